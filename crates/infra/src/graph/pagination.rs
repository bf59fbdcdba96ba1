//! Paginated Graph fetcher
//!
//! Walks the `@odata.nextLink` chain: every page is fetched with a GET, its
//! `value` array appended in arrival order, and the next link followed after
//! a fixed throttle pause. No page is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use presencesync_domain::{AccessToken, PresenceSyncError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::errors::conversions::describe_error_response;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Suspension point between page requests
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioThrottle;

#[async_trait]
impl Throttle for TokioThrottle {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphPage<T> {
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// GET-with-cursor client returning the concatenated record set
#[derive(Clone)]
pub struct PaginatedFetcher {
    http: HttpClient,
    throttle: Arc<dyn Throttle>,
    page_delay: Duration,
}

impl PaginatedFetcher {
    pub fn new(http: HttpClient, page_delay: Duration) -> Self {
        Self { http, throttle: Arc::new(TokioThrottle), page_delay }
    }

    /// Replace the throttle (tests count pauses instead of sleeping)
    pub fn with_throttle(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// Fetch every page starting at `initial_uri`.
    ///
    /// # Errors
    /// `PresenceSyncError::Transport` on a network failure, a non-success
    /// status or a page that does not decode.
    pub async fn fetch<T>(&self, token: &AccessToken, initial_uri: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.fetch_with_headers(token, initial_uri, &[]).await
    }

    /// Same as [`fetch`](Self::fetch), sending `headers` with every page
    /// request.
    pub async fn fetch_with_headers<T>(
        &self,
        token: &AccessToken,
        initial_uri: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut records = Vec::new();
        let mut next_uri = Some(initial_uri.to_owned());
        let mut pages = 0usize;

        while let Some(uri) = next_uri.take() {
            if pages > 0 {
                self.throttle.pause(self.page_delay).await;
            }
            pages += 1;

            let mut request = self.http.request(Method::GET, uri.as_str()).bearer_auth(token.as_str());
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            let response = self.http.send(request).await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PresenceSyncError::Transport(describe_error_response(status, &body)));
            }

            let page: GraphPage<T> = response
                .json()
                .await
                .map_err(|err| PresenceSyncError::from(InfraError::from(err)))?;

            debug!(
                page = pages,
                records = page.value.len(),
                has_next = page.next_link.is_some(),
                "page received"
            );

            records.extend(page.value);
            next_uri = page.next_link;
        }

        Ok(records)
    }
}
