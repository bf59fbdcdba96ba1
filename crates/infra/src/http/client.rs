use std::time::Duration;

use presencesync_domain::{PresenceSyncError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

const DEFAULT_USER_AGENT: &str = concat!("presencesync/", env!("CARGO_PKG_VERSION"));

/// HTTP client with timeout support.
///
/// Each request is attempted exactly once; retrying is left to whoever
/// schedules the next pass.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Only transport-level failures are errors here; callers inspect the
    /// status of the returned response.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(|err| PresenceSyncError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %redact_query(&url), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, url = %redact_query(&url), %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, url = %redact_query(&url), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Query strings carry OData filters with user-visible subjects; keep them
/// out of debug logs.
fn redact_query(url: &reqwest::Url) -> String {
    let mut redacted = url.clone();
    if redacted.query().is_some() {
        redacted.set_query(Some("redacted"));
    }
    redacted.to_string()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .no_proxy()
            .build()
            .map_err(|err| PresenceSyncError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
