//! Organization user listing

use async_trait::async_trait;
use presencesync_core::DirectoryPort;
use presencesync_domain::{AccessToken, Principal, Result};
use tracing::instrument;

use super::graph_url;
use super::pagination::PaginatedFetcher;

const USER_SELECT: &str = "id,displayName";

/// Lists every user in the tenant through `/users`
#[derive(Clone)]
pub struct GraphDirectory {
    fetcher: PaginatedFetcher,
    base_url: String,
}

impl GraphDirectory {
    pub fn new(fetcher: PaginatedFetcher, base_url: impl Into<String>) -> Self {
        Self { fetcher, base_url: base_url.into() }
    }
}

#[async_trait]
impl DirectoryPort for GraphDirectory {
    #[instrument(skip_all)]
    async fn list_principals(&self, token: &AccessToken) -> Result<Vec<Principal>> {
        let mut url = graph_url(&self.base_url, &["users"])?;
        url.query_pairs_mut().append_pair("$select", USER_SELECT);

        self.fetcher.fetch(token, url.as_str()).await
    }
}
