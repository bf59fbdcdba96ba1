//! Conversions from external infrastructure errors into domain errors.

use presencesync_domain::PresenceSyncError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PresenceSyncError);

impl From<InfraError> for PresenceSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PresenceSyncError> for InfraError {
    fn from(value: PresenceSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPresenceSyncError {
    fn into_presencesync(self) -> PresenceSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PresenceSyncError */
/* -------------------------------------------------------------------------- */

impl IntoPresenceSyncError for HttpError {
    fn into_presencesync(self) -> PresenceSyncError {
        if self.is_timeout() {
            return PresenceSyncError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PresenceSyncError::Transport("HTTP connection failure".into());
        }

        if self.is_decode() {
            return PresenceSyncError::Transport(format!("malformed response payload: {self}"));
        }

        if self.is_builder() {
            return PresenceSyncError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return PresenceSyncError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        PresenceSyncError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_presencesync())
    }
}

/// Build the error for a non-success Graph response.
///
/// Graph wraps failures as `{"error": {"code": "...", "message": "..."}}`;
/// the code is surfaced when present so logs show e.g.
/// `MailboxNotEnabledForRESTAPI` instead of a bare status.
pub fn describe_error_response(status: reqwest::StatusCode, body: &str) -> String {
    let code = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|value| {
        value.get("error").and_then(|error| error.get("code")).and_then(|code| {
            code.as_str().map(str::to_owned)
        })
    });

    match code {
        Some(code) => format!("HTTP {} {}", status.as_u16(), code),
        None if body.trim().is_empty() => format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status")
        ),
        None => format!("HTTP {}: {}", status.as_u16(), body.trim()),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
