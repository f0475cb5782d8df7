use reqwest::Method;

use crate::{Client, Context, Error};

const PING_PATH: &str = "/ping";

/// Health check against `GET /ping`.
pub struct PingEndpoint<'a> {
    client: &'a Client,
}

impl<'a> PingEndpoint<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Verifies the API is reachable and accepts the client's API key.
    ///
    /// Any 2xx response is success; the body is ignored.
    pub async fn get(&self, ctx: Option<&Context>) -> Result<(), Error> {
        self.client.send(ctx, Method::GET, PING_PATH, None).await
    }
}
