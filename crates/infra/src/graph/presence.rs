//! `setPresence` dispatcher

use async_trait::async_trait;
use presencesync_core::PresencePort;
use presencesync_domain::{AccessToken, PresenceCommand, PresenceSyncError, Result};
use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::graph_url;
use crate::errors::conversions::describe_error_response;
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetPresenceBody<'a> {
    session_id: &'a str,
    availability: &'static str,
    activity: &'static str,
    expiration_duration: String,
}

/// Applies presence overrides under the application's session
#[derive(Clone)]
pub struct GraphPresenceDispatcher {
    http: HttpClient,
    base_url: String,
    session_id: String,
}

impl GraphPresenceDispatcher {
    /// `session_id` is the registered application id; Graph ties the
    /// override to it.
    pub fn new(http: HttpClient, base_url: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), session_id: session_id.into() }
    }
}

#[async_trait]
impl PresencePort for GraphPresenceDispatcher {
    #[instrument(
        skip(self, token, command),
        fields(user_id = %command.user_id, correlation_id = %command.correlation_id)
    )]
    async fn apply(&self, token: &AccessToken, command: &PresenceCommand) -> Result<()> {
        let url = graph_url(
            &self.base_url,
            &["users", command.user_id.as_str(), "presence", "setPresence"],
        )?;

        let body = SetPresenceBody {
            session_id: &self.session_id,
            availability: command.availability.as_wire_str(),
            activity: command.activity.as_wire_str(),
            expiration_duration: command.expiration_duration(),
        };

        let request = self
            .http
            .request(Method::POST, url)
            .bearer_auth(token.as_str())
            .header("client-request-id", command.correlation_id.to_string())
            .json(&body);

        let response = self.http.send(request).await.map_err(|err| match err {
            PresenceSyncError::Transport(message) => PresenceSyncError::Dispatch(message),
            other => other,
        })?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.text().await.unwrap_or_default();
            let message = describe_error_response(status, &payload);
            warn!(%status, error = %message, "setPresence rejected");
            return Err(PresenceSyncError::Dispatch(message));
        }

        info!(
            availability = %command.availability,
            activity = %command.activity,
            expiration = %body.expiration_duration,
            "presence override applied"
        );
        Ok(())
    }
}
