//! Marked calendar event query

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use presencesync_core::EventSource;
use presencesync_domain::{
    resolve_time_zone, AccessToken, CandidateEvent, PresenceSyncError, Principal, Result,
    WindowConfig,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::graph_url;
use super::pagination::PaginatedFetcher;

const OUTLOOK_TIMEZONE_HEADER: &str = r#"outlook.timezone="UTC""#;
const EVENT_SELECT: &str = "id,subject,start,end,originalStartTimeZone";
const FILTER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Queries `/users/{id}/events` for marked events in the lookahead window
#[derive(Clone)]
pub struct GraphEventSource {
    fetcher: PaginatedFetcher,
    base_url: String,
    marker_subject: String,
    lookahead: Duration,
}

impl GraphEventSource {
    pub fn new(
        fetcher: PaginatedFetcher,
        base_url: impl Into<String>,
        marker_subject: impl Into<String>,
        lookahead: Duration,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            marker_subject: marker_subject.into(),
            lookahead,
        }
    }

    pub fn from_config(
        fetcher: PaginatedFetcher,
        base_url: impl Into<String>,
        window: &WindowConfig,
    ) -> Self {
        Self::new(
            fetcher,
            base_url,
            window.marker_subject.clone(),
            Duration::minutes(window.lookahead_minutes),
        )
    }

    /// OData filter: start in `[now, now + lookahead)` and exact subject match.
    pub fn build_filter(&self, now_utc: DateTime<Utc>) -> String {
        let until = now_utc + self.lookahead;
        format!(
            "start/dateTime ge '{}' and start/dateTime lt '{}' and subject eq '{}'",
            now_utc.format(FILTER_TIME_FORMAT),
            until.format(FILTER_TIME_FORMAT),
            escape_odata_literal(&self.marker_subject)
        )
    }
}

#[async_trait]
impl EventSource for GraphEventSource {
    #[instrument(skip(self, token), fields(principal_id = %principal.id))]
    async fn find_marked_events(
        &self,
        token: &AccessToken,
        principal: &Principal,
        now_utc: DateTime<Utc>,
    ) -> Result<Vec<CandidateEvent>> {
        let mut url = graph_url(&self.base_url, &["users", principal.id.as_str(), "events"])?;
        url.query_pairs_mut()
            .append_pair("$filter", &self.build_filter(now_utc))
            .append_pair("$select", EVENT_SELECT);

        let events: Vec<GraphEvent> = self
            .fetcher
            .fetch_with_headers(token, url.as_str(), &[("Prefer", OUTLOOK_TIMEZONE_HEADER)])
            .await?;

        debug!(count = events.len(), "marked events received");

        events.into_iter().map(GraphEvent::into_candidate).collect()
    }
}

/// Single quotes inside OData string literals are doubled.
fn escape_odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphEvent {
    id: Option<String>,
    subject: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
    original_start_time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    date_time: String,
    time_zone: Option<String>,
}

impl GraphEvent {
    fn into_candidate(self) -> Result<CandidateEvent> {
        Ok(CandidateEvent {
            start_instant: self.start.to_utc_naive()?,
            end_instant: self.end.to_utc_naive()?,
            id: self.id,
            subject: self.subject.unwrap_or_default(),
            original_time_zone_id: self.original_start_time_zone.unwrap_or_default(),
        })
    }
}

impl EventDateTime {
    /// Naive UTC wall-clock value of this timestamp.
    ///
    /// The query asks for UTC rendering; a response rendered in another zone
    /// is converted rather than trusted.
    fn to_utc_naive(&self) -> Result<NaiveDateTime> {
        let value = self.date_time.trim().trim_end_matches('Z');
        let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map_err(|err| {
            PresenceSyncError::Transport(format!(
                "malformed event timestamp '{}': {err}",
                self.date_time
            ))
        })?;

        match self.time_zone.as_deref().map(str::trim) {
            None | Some("") => Ok(naive),
            Some(zone) if zone.eq_ignore_ascii_case("utc") => Ok(naive),
            Some(zone) => {
                let tz = resolve_time_zone(zone).map_err(|err| {
                    PresenceSyncError::Transport(format!("event rendered in unusable zone: {err}"))
                })?;
                tz.from_local_datetime(&naive)
                    .earliest()
                    .map(|local| local.naive_utc())
                    .ok_or_else(|| {
                        PresenceSyncError::Transport(format!(
                            "event timestamp {naive} does not exist in {zone}"
                        ))
                    })
            }
        }
    }
}
