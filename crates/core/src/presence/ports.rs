//! Port interfaces for the presence pass
//!
//! These traits define the boundaries between the decision logic and the
//! remote directory, calendar and presence endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use presencesync_domain::{AccessToken, CandidateEvent, PresenceCommand, Principal, Result};

/// Supplies bearer tokens for the remote API
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Acquire a fresh access token.
    ///
    /// Failures surface as `PresenceSyncError::Auth` and abort the pass.
    async fn acquire_token(&self) -> Result<AccessToken>;
}

/// Enumerates every principal in the organization
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// List all principals, every page flattened, in arrival order
    async fn list_principals(&self, token: &AccessToken) -> Result<Vec<Principal>>;
}

/// Finds marked calendar events for one principal
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events whose subject equals the marker and whose start lies in the
    /// lookahead window beginning at `now_utc`
    async fn find_marked_events(
        &self,
        token: &AccessToken,
        principal: &Principal,
        now_utc: DateTime<Utc>,
    ) -> Result<Vec<CandidateEvent>>;
}

/// Issues presence state changes
#[async_trait]
pub trait PresencePort: Send + Sync {
    /// Apply a single presence override; rejection is `PresenceSyncError::Dispatch`
    async fn apply(&self, token: &AccessToken, command: &PresenceCommand) -> Result<()>;
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
