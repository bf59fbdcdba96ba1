use async_trait::async_trait;
use presencesync_core::CredentialProvider;
use presencesync_domain::constants::GRAPH_DEFAULT_SCOPE;
use presencesync_domain::{AccessToken, Config, PresenceSyncError, Result, TenantConfig};
use reqwest::Method;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::http::HttpClient;

/// Identity platform error body (`{"error": "...", "error_description": "..."}`)
#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// OAuth2 client-credentials grant against the tenant's token endpoint
#[derive(Clone)]
pub struct ClientCredentialsProvider {
    http: HttpClient,
    authority_url: String,
    tenant: TenantConfig,
}

impl ClientCredentialsProvider {
    pub fn new(http: HttpClient, authority_url: impl Into<String>, tenant: TenantConfig) -> Self {
        Self { http, authority_url: authority_url.into(), tenant }
    }

    pub fn from_config(http: HttpClient, config: &Config) -> Self {
        Self::new(http, config.graph.authority_url.clone(), config.tenant.clone())
    }

    /// `{authority}/{tenant}/oauth2/v2.0/token`
    pub fn token_endpoint(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.authority_url)
            .map_err(|err| PresenceSyncError::Config(format!("invalid authority URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                PresenceSyncError::Config(format!(
                    "authority URL cannot be a base: {}",
                    self.authority_url
                ))
            })?
            .pop_if_empty()
            .extend([self.tenant.tenant_id.as_str(), "oauth2", "v2.0", "token"]);
        Ok(url)
    }
}

#[async_trait]
impl CredentialProvider for ClientCredentialsProvider {
    #[instrument(skip(self), fields(tenant_id = %self.tenant.tenant_id))]
    async fn acquire_token(&self) -> Result<AccessToken> {
        let request = self.http.request(Method::POST, self.token_endpoint()?).form(&[
            ("client_id", self.tenant.app_id.as_str()),
            ("client_secret", self.tenant.app_secret.as_str()),
            ("scope", GRAPH_DEFAULT_SCOPE),
            ("grant_type", "client_credentials"),
        ]);

        let response = self
            .http
            .send(request)
            .await
            .map_err(|err| PresenceSyncError::Auth(format!("token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<TokenErrorBody>(&body) {
                Ok(parsed) => match parsed.error_description {
                    Some(description) => format!("{}: {}", parsed.error, first_line(&description)),
                    None => parsed.error,
                },
                Err(_) => status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
            return Err(PresenceSyncError::Auth(format!(
                "token endpoint returned {}: {reason}",
                status.as_u16()
            )));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|err| PresenceSyncError::Auth(format!("failed to parse token response: {err}")))?;

        if token.secret.is_empty() {
            return Err(PresenceSyncError::Auth("token endpoint returned an empty token".into()));
        }

        info!(expires_in = token.expires_in, "access token acquired");
        Ok(token)
    }
}

/// AAD descriptions append trace and correlation ids on later lines.
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text).trim()
}
