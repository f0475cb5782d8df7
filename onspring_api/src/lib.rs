//! Async client for the Onspring REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), onspring_api::Error> {
//! use onspring_api::{Client, Context, PagingRequest};
//!
//! let client = Client::new("your-api-key")?;
//! let ctx = Context::background();
//!
//! client.ping().get(Some(&ctx)).await?;
//!
//! let page = client
//!     .apps()
//!     .get(Some(&ctx), Some(PagingRequest::default().with_page_size(10)))
//!     .await?;
//! for app in &page {
//!     println!("{} {}", app.id, app.name);
//! }
//! # Ok(())
//! # }
//! ```
mod client;
mod context;
mod endpoints;
mod errors;
mod query;
pub mod types;
pub use self::client::{
    Client, ClientBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use self::context::Context;
pub use self::endpoints::{AppsEndpoint, PingEndpoint};
pub use self::errors::{ApiError, Error};
pub use self::query::{PagingRequest, Query, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
pub use tokio_util::sync::CancellationToken;
