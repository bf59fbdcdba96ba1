//! Directory principals and credentials

use serde::{Deserialize, Serialize};

/// A user whose calendar is polled during a pass.
///
/// Sourced fresh from the directory on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: Some(display_name.into()) }
    }

    /// Display name when present, otherwise the object id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or(&self.id)
    }
}

/// Bearer token issued by the credential provider.
///
/// Acquired once per pass and shared read-only by every request.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    #[serde(rename = "access_token")]
    pub secret: String,
    #[serde(default)]
    pub expires_in: i64,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_in: i64) -> Self {
        Self { secret: secret.into(), expires_in }
    }

    pub fn as_str(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
