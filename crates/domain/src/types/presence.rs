//! Presence override commands

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_OVERRIDE_MINUTES;

/// Graph presence availability values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
    DoNotDisturb,
    BeRightBack,
    Away,
}

crate::impl_wire_value_conversions!(Availability {
    Available => "Available",
    Busy => "Busy",
    DoNotDisturb => "DoNotDisturb",
    BeRightBack => "BeRightBack",
    Away => "Away",
});

/// Graph presence activity values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Available,
    InACall,
    InAConferenceCall,
    Presenting,
    Away,
}

crate::impl_wire_value_conversions!(Activity {
    Available => "Available",
    InACall => "InACall",
    InAConferenceCall => "InAConferenceCall",
    Presenting => "Presenting",
    Away => "Away",
});

/// Outcome of the window decision for a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceAction {
    /// Override duration, always within `0..=MAX_OVERRIDE_MINUTES`.
    pub expiration_minutes: i64,
}

impl PresenceAction {
    /// Build an action, clamping the expiration into the allowed range.
    pub fn new(expiration_minutes: i64) -> Self {
        Self { expiration_minutes: expiration_minutes.clamp(0, MAX_OVERRIDE_MINUTES) }
    }
}

/// Outbound instruction for the presence endpoint.
///
/// Fire-and-forget: no identity is retained after dispatch beyond the
/// correlation id that tags the request for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceCommand {
    pub user_id: String,
    pub availability: Availability,
    pub activity: Activity,
    pub expiration_minutes: i64,
    pub correlation_id: Uuid,
}

impl PresenceCommand {
    /// The "in a meeting, presenting" override issued for marked events.
    pub fn presenting(user_id: impl Into<String>, action: PresenceAction) -> Self {
        Self {
            user_id: user_id.into(),
            availability: Availability::DoNotDisturb,
            activity: Activity::Presenting,
            expiration_minutes: action.expiration_minutes,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// ISO-8601 duration string understood by Graph, e.g. `PT30M`.
    pub fn expiration_duration(&self) -> String {
        format!("PT{}M", self.expiration_minutes)
    }
}
