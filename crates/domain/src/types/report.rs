//! Pass summary

use serde::{Deserialize, Serialize};

/// Principal skipped because of a fault inside its boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalFault {
    pub principal_id: String,
    /// Stable error label, see [`crate::PresenceSyncError::label`].
    pub kind: String,
    pub message: String,
}

/// Counters describing one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub principals_seen: usize,
    pub principals_skipped: usize,
    pub events_seen: usize,
    /// Events dropped because their time zone could not be resolved.
    pub events_skipped: usize,
    /// Events outside the actionable window on this pass.
    pub deferred: usize,
    pub dispatched: usize,
    pub dispatch_failures: usize,
    /// Actions that would have been dispatched in dry-run mode.
    pub dry_run_actions: usize,
    pub faults: Vec<PrincipalFault>,
}

impl PassReport {
    /// True when every principal was processed and every dispatch succeeded.
    pub fn is_clean(&self) -> bool {
        self.principals_skipped == 0 && self.dispatch_failures == 0 && self.events_skipped == 0
    }
}
