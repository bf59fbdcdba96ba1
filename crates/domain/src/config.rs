//! Configuration management
//!
//! One `Config` value is built per invocation and passed explicitly into the
//! pass; nothing here is read from ambient process state.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACTION_THRESHOLD_MINUTES, DEFAULT_AUTHORITY_URL, DEFAULT_GRAPH_BASE_URL,
    DEFAULT_LOOKAHEAD_MINUTES, DEFAULT_PAGE_DELAY_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    MAX_OVERRIDE_MINUTES,
};
use crate::errors::{PresenceSyncError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tenant: TenantConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// App registration used for the client-credentials exchange
#[derive(Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub tenant_id: String,
    pub app_id: String,
    #[serde(skip_serializing, default)]
    pub app_secret: String,
}

impl std::fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantConfig")
            .field("tenant_id", &self.tenant_id)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Remote endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub base_url: String,
    pub authority_url: String,
    /// Pause between consecutive page requests.
    pub page_delay_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            authority_url: DEFAULT_AUTHORITY_URL.to_string(),
            page_delay_seconds: DEFAULT_PAGE_DELAY_SECS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Event selection and decision window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Exact subject that marks an event for a presence override.
    pub marker_subject: String,
    /// Horizon of the event query, starting at "now".
    pub lookahead_minutes: i64,
    /// Events starting within this many minutes (or already started) act.
    pub action_threshold_minutes: i64,
    /// Upper bound on the override duration.
    pub max_override_minutes: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            marker_subject: String::new(),
            lookahead_minutes: DEFAULT_LOOKAHEAD_MINUTES,
            action_threshold_minutes: DEFAULT_ACTION_THRESHOLD_MINUTES,
            max_override_minutes: MAX_OVERRIDE_MINUTES,
        }
    }
}

impl Config {
    /// Check the invariants the pass relies on.
    ///
    /// # Errors
    /// Returns `PresenceSyncError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("tenant.tenant_id", &self.tenant.tenant_id)?;
        require_non_empty("tenant.app_id", &self.tenant.app_id)?;
        require_non_empty("tenant.app_secret", &self.tenant.app_secret)?;
        require_non_empty("window.marker_subject", &self.window.marker_subject)?;
        require_non_empty("graph.base_url", &self.graph.base_url)?;
        require_non_empty("graph.authority_url", &self.graph.authority_url)?;

        let window = &self.window;
        if window.lookahead_minutes <= 0 {
            return Err(PresenceSyncError::Config(
                "window.lookahead_minutes must be positive".into(),
            ));
        }
        if window.action_threshold_minutes < 0
            || window.action_threshold_minutes > window.lookahead_minutes
        {
            return Err(PresenceSyncError::Config(format!(
                "window.action_threshold_minutes must be within 0..={}",
                window.lookahead_minutes
            )));
        }
        if !(0..=MAX_OVERRIDE_MINUTES).contains(&window.max_override_minutes) {
            return Err(PresenceSyncError::Config(format!(
                "window.max_override_minutes must be within 0..={MAX_OVERRIDE_MINUTES}"
            )));
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PresenceSyncError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}
