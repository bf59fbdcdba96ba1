//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PresenceSync
///
/// Each variant maps to a fault scope during a pass:
/// - `Auth`: credential acquisition failed, the whole pass aborts
/// - `Transport`: an HTTP call failed or returned a malformed payload, the
///   enclosing principal is skipped
/// - `TimeZoneResolution`: an event carried an unknown time zone id, only
///   that event is skipped
/// - `Dispatch`: a presence update was rejected, processing continues
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PresenceSyncError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Time zone resolution error: {0}")]
    TimeZoneResolution(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PresenceSyncError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Transport(_) => "transport",
            Self::TimeZoneResolution(_) => "time_zone_resolution",
            Self::Dispatch(_) => "dispatch",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Result type alias for PresenceSync operations
pub type Result<T> = std::result::Result<T, PresenceSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(PresenceSyncError::Auth("x".into()).label(), "auth");
        assert_eq!(PresenceSyncError::Transport("x".into()).label(), "transport");
        assert_eq!(
            PresenceSyncError::TimeZoneResolution("x".into()).label(),
            "time_zone_resolution"
        );
        assert_eq!(PresenceSyncError::Dispatch("x".into()).label(), "dispatch");
        assert_eq!(PresenceSyncError::Config("x".into()).label(), "config");
        assert_eq!(PresenceSyncError::InvalidInput("x".into()).label(), "invalid_input");
    }

    #[test]
    fn unknown_variant_tag_is_rejected() {
        let result = serde_json::from_str::<PresenceSyncError>(
            r#"{"type":"Internal","message":"boom"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = PresenceSyncError::Transport("HTTP 503".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Transport");
        assert_eq!(json["message"], "HTTP 503");
    }
}
