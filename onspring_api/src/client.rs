//! HTTP client for the Onspring API.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{
    context::Context,
    endpoints::{AppsEndpoint, PingEndpoint},
    query::Query,
    ApiError, Error,
};

/// Production Onspring API address.
pub const DEFAULT_BASE_URL: &str = "https://api.onspring.com";
/// Timeout applied to the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// API version sent in the `x-api-version` header.
pub const DEFAULT_API_VERSION: &str = "2.0";

const API_KEY_HEADER: &str = "x-api-key";
const API_VERSION_HEADER: &str = "x-api-version";

/// HTTP client for the Onspring API.
///
/// Every request carries the API key and API version headers. The client is
/// immutable once built and can be shared across tasks; endpoints are reached
/// through [`Client::ping`] and [`Client::apps`].
pub struct Client {
    http_client: reqwest::Client,
    /// Base URL for the API. Defaults to `https://api.onspring.com`.
    base_url: String,
    api_key: String,
    api_version: String,
    /// Timeout of the default transport. `None` when a transport was supplied.
    timeout: Option<Duration>,
}

/// Builder for [`Client`]. Options apply in call order; setting the same
/// option twice keeps the last value.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    api_version: String,
    http_client: Option<reqwest::Client>,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ClientBuilder {
    fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Uses an existing `reqwest::Client` as transport. Its own timeout and
    /// settings are left untouched.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Points the client at another Onspring environment or a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Overrides the `x-api-version` header value.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// Sets the timeout of the default transport. Ignored when a transport is
    /// supplied with [`ClientBuilder::with_http_client`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client. No request is made and the base URL is not
    /// validated here.
    pub fn build(self) -> Result<Client, Error> {
        let (http_client, timeout) = match self.http_client {
            Some(http_client) => (http_client, None),
            None => {
                let http_client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(|e| {
                        tracing::error!("Failed to build HTTP client: {}", e);
                        Error::Transport(e)
                    })?;
                (http_client, Some(self.timeout))
            }
        };
        Ok(Client {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            api_version: self.api_version,
            timeout,
        })
    }
}

impl Client {
    /// Creates a client for the production API with default settings.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Starts configuring a client authenticated with `api_key`.
    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Health check endpoint.
    pub fn ping(&self) -> PingEndpoint<'_> {
        PingEndpoint::new(self)
    }

    /// App listing endpoint.
    pub fn apps(&self) -> AppsEndpoint<'_> {
        AppsEndpoint::new(self)
    }

    /// API key sent in the `x-api-key` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL every request path is joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `x-api-version` header.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Timeout of the default transport, `None` for a supplied transport.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Transport used for every request.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    fn get_url(&self, path: &str, query: Option<&(dyn Query + Sync)>) -> Result<Url, Error> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let url = Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestConstruction(format!("invalid url {:?}: {}", raw, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            tracing::error!("Unsupported URL scheme: {}", url.scheme());
            return Err(Error::RequestConstruction(format!(
                "unsupported url scheme {:?}",
                url.scheme()
            )));
        }
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Builds an authenticated, versioned request. Fails without touching the
    /// network when the request is malformed.
    fn new_request(
        &self,
        method: Method,
        path: &str,
        query: Option<&(dyn Query + Sync)>,
    ) -> Result<Request, Error> {
        if let Some(query) = query {
            query.validate()?;
        }

        let url = self.get_url(path, query)?;
        let mut api_key = header_value(API_KEY_HEADER, &self.api_key)?;
        api_key.set_sensitive(true);
        let api_version = header_value(API_VERSION_HEADER, &self.api_version)?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(HeaderName::from_static(API_VERSION_HEADER), api_version);
        Ok(request)
    }

    /// Sends the request under `ctx` and reads the whole body. A failed body
    /// read is only an error when `body_required` is set and the status is a
    /// success; otherwise the body is treated as empty.
    async fn execute(
        &self,
        ctx: &Context,
        request: Request,
        body_required: bool,
    ) -> Result<(StatusCode, Vec<u8>), Error> {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");

        let exchange = async {
            let response = self.http_client.execute(request).await?;
            let status = response.status();
            let body = match response.bytes().await {
                Ok(body) => body.to_vec(),
                Err(e) if body_required && status.is_success() => {
                    return Err(Error::Transport(e));
                }
                // Unreadable error bodies fall back to the reason phrase.
                Err(e) => {
                    tracing::error!("Failed to read response body: {}", e);
                    Vec::new()
                }
            };
            Ok::<_, Error>((status, body))
        };

        ctx.run(exchange).await.and_then(|result| result).map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            e
        })
    }

    /// Sends a request whose success response carries no payload.
    pub(crate) async fn send(
        &self,
        ctx: Option<&Context>,
        method: Method,
        path: &str,
        query: Option<&(dyn Query + Sync)>,
    ) -> Result<(), Error> {
        let ctx = require_context(ctx, path)?;
        let request = self.new_request(method, path, query)?;
        let (status, body) = self.execute(ctx, request, false).await?;
        check_status(status, &body)
    }

    /// Sends a request and decodes the success response body as JSON.
    pub(crate) async fn send_json<T>(
        &self,
        ctx: Option<&Context>,
        method: Method,
        path: &str,
        query: Option<&(dyn Query + Sync)>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let ctx = require_context(ctx, path)?;
        let request = self.new_request(method, path, query)?;
        let (status, body) = self.execute(ctx, request, true).await?;
        check_status(status, &body)?;

        serde_json::from_slice::<T>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse resource: {} | body: {}",
                e,
                truncate_body(&body)
            );
            Error::Decode(e)
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn require_context<'c>(ctx: Option<&'c Context>, path: &str) -> Result<&'c Context, Error> {
    ctx.ok_or_else(|| {
        tracing::error!("Request to {} made without a context", path);
        Error::Configuration("context must not be absent".to_string())
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| {
        tracing::error!("Invalid value for header {}: {}", name, e);
        Error::RequestConstruction(format!("invalid {} header value: {}", name, e))
    })
}

/// Maps a status outside 200-299 to [`Error::Api`]. The message comes from a
/// `{"message": "..."}` body when present, else the status reason phrase.
fn check_status(status: StatusCode, body: &[u8]) -> Result<(), Error> {
    if status.is_success() {
        return Ok(());
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

    tracing::error!(
        "Request failed with status {}: {}",
        status,
        truncate_body(body)
    );
    Err(Error::Api(ApiError {
        status_code: status.as_u16(),
        message,
    }))
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    let body = String::from_utf8_lossy(body);
    if body.len() <= MAX {
        return body.into_owned();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
