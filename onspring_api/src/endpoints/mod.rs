mod apps;
pub use self::apps::AppsEndpoint;

mod ping;
pub use self::ping::PingEndpoint;
