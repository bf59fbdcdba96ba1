//! Time normalizer
//!
//! Resolves an event's time zone and projects its raw UTC start/end into
//! that zone. The offset is looked up at each instant, so events on the far
//! side of a DST transition get the offset that applies on their own date.

use std::sync::Arc;

use chrono::TimeZone;
use presencesync_domain::{resolve_time_zone, CandidateEvent, NormalizedEvent, Result};

use super::ports::Clock;

/// Converts candidate events into comparable, zone-aware events
#[derive(Clone)]
pub struct TimeNormalizer {
    clock: Arc<dyn Clock>,
}

impl TimeNormalizer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Normalize a single event.
    ///
    /// "Now" is read from the clock on every call. `minutes_until_start` is
    /// the whole-minute lead, truncated toward zero.
    ///
    /// # Errors
    /// Returns `PresenceSyncError::TimeZoneResolution` when the event's zone
    /// id is not recognized. The error only concerns this event.
    pub fn normalize(&self, event: &CandidateEvent) -> Result<NormalizedEvent> {
        let time_zone = resolve_time_zone(&event.original_time_zone_id)?;

        let local_start = time_zone.from_utc_datetime(&event.start_instant);
        let local_end = time_zone.from_utc_datetime(&event.end_instant);

        // Raw instants: the zone offset must not leak into the length.
        let duration = event.end_instant - event.start_instant;

        let now_local = self.clock.now().with_timezone(&time_zone);
        let until_start = local_start.signed_duration_since(now_local);
        // Whole minutes, truncated toward zero: 5m30s counts as 5.
        #[allow(clippy::cast_precision_loss)]
        let minutes_until_start = until_start.num_minutes() as f64;

        Ok(NormalizedEvent {
            subject: event.subject.clone(),
            local_start,
            local_end,
            duration,
            minutes_until_start,
            time_zone,
        })
    }
}
