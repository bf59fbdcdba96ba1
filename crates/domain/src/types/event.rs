//! Calendar event representations
//!
//! `CandidateEvent` is what the event query returns; `NormalizedEvent` is
//! the ephemeral view the decision engine works on.

use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Raw marked calendar entry as returned by the remote query.
///
/// `start_instant` and `end_instant` are naive wall-clock values in UTC (the
/// event query asks Graph for UTC rendering); `original_time_zone_id` names
/// the zone the organizer created the event in and drives the local view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEvent {
    pub id: Option<String>,
    pub subject: String,
    pub start_instant: NaiveDateTime,
    pub end_instant: NaiveDateTime,
    pub original_time_zone_id: String,
}

/// Event with start/end resolved into its own time zone.
///
/// Exists only within one decision cycle; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub subject: String,
    pub local_start: DateTime<Tz>,
    pub local_end: DateTime<Tz>,
    pub duration: Duration,
    /// Minutes from "now" until `local_start` as produced by the normalizer
    /// (whole minutes, truncated toward zero); negative once the event has
    /// started.
    pub minutes_until_start: f64,
    pub time_zone: Tz,
}

impl NormalizedEvent {
    /// Length of the event in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }

    /// `minutes_until_start` truncated toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole_minutes_until_start(&self) -> i64 {
        self.minutes_until_start.trunc() as i64
    }
}
