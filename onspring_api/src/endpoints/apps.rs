use reqwest::Method;

use crate::{
    types::{App, Page},
    Client, Context, Error, PagingRequest,
};

const APPS_PATH: &str = "/apps";

/// Paginated listing of apps at `GET /apps`.
pub struct AppsEndpoint<'a> {
    client: &'a Client,
}

impl<'a> AppsEndpoint<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of apps. `None` paging requests the first page of 50.
    pub async fn get(
        &self,
        ctx: Option<&Context>,
        paging: Option<PagingRequest>,
    ) -> Result<Page<App>, Error> {
        let paging = paging.unwrap_or_default();
        self.client
            .send_json::<Page<App>>(ctx, Method::GET, APPS_PATH, Some(&paging))
            .await
    }
}
