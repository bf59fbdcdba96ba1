//! Window decision engine
//!
//! An event acts once it is at most `action_threshold_minutes` away,
//! including events that already started. The override lasts as long as the
//! meeting, capped at `max_override_minutes`.

use presencesync_domain::{NormalizedEvent, PresenceAction, WindowConfig};

/// Decides whether a normalized event triggers a presence override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDecisionEngine {
    action_threshold_minutes: i64,
    max_override_minutes: i64,
}

impl WindowDecisionEngine {
    pub fn new(action_threshold_minutes: i64, max_override_minutes: i64) -> Self {
        Self { action_threshold_minutes, max_override_minutes }
    }

    pub fn from_config(window: &WindowConfig) -> Self {
        Self::new(window.action_threshold_minutes, window.max_override_minutes)
    }

    /// `Some(action)` when the event is inside the actionable window.
    #[allow(clippy::cast_precision_loss)]
    pub fn decide(&self, event: &NormalizedEvent) -> Option<PresenceAction> {
        if event.minutes_until_start > self.action_threshold_minutes as f64 {
            return None;
        }

        let expiration = event.duration_minutes().min(self.max_override_minutes);
        Some(PresenceAction::new(expiration))
    }
}

impl Default for WindowDecisionEngine {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}
