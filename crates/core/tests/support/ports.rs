#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use presencesync_core::{Clock, CredentialProvider, DirectoryPort, EventSource, PresencePort};
use presencesync_domain::{
    AccessToken, CandidateEvent, PresenceCommand, PresenceSyncError, Principal, Result,
};

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that moves forward by `step` after every reading.
///
/// Stands in for time spent on network round trips between the event query
/// and the decision.
pub struct SteppingClock {
    start: DateTime<Utc>,
    step: Duration,
    readings: Mutex<Vec<DateTime<Utc>>>,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self { start, step, readings: Mutex::new(Vec::new()) }
    }

    pub fn readings(&self) -> Vec<DateTime<Utc>> {
        self.readings.lock().unwrap().clone()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut readings = self.readings.lock().unwrap();
        let steps = i32::try_from(readings.len()).unwrap();
        let now = self.start + self.step * steps;
        readings.push(now);
        now
    }
}

/// Credential provider that either hands out a static token or fails.
pub struct StaticCredentials {
    fail: bool,
    calls: Mutex<usize>,
}

impl StaticCredentials {
    pub fn ok() -> Self {
        Self { fail: false, calls: Mutex::new(0) }
    }

    pub fn failing() -> Self {
        Self { fail: true, calls: Mutex::new(0) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn acquire_token(&self) -> Result<AccessToken> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(PresenceSyncError::Auth("invalid_client".into()));
        }
        Ok(AccessToken::new("test-token", 3599))
    }
}

/// Directory returning a fixed principal list.
pub struct InMemoryDirectory {
    principals: Option<Vec<Principal>>,
}

impl InMemoryDirectory {
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { principals: Some(principals) }
    }

    pub fn unreachable() -> Self {
        Self { principals: None }
    }
}

#[async_trait]
impl DirectoryPort for InMemoryDirectory {
    async fn list_principals(&self, token: &AccessToken) -> Result<Vec<Principal>> {
        assert_eq!(token.as_str(), "test-token");
        self.principals
            .clone()
            .ok_or_else(|| PresenceSyncError::Transport("users listing returned 503".into()))
    }
}

/// Event source keyed by principal id. Principals listed in `failing`
/// raise a transport error, mimicking a mailbox that cannot be queried.
#[derive(Default)]
pub struct InMemoryEvents {
    events: HashMap<String, Vec<CandidateEvent>>,
    failing: Vec<String>,
    queried: Mutex<Vec<String>>,
}

impl InMemoryEvents {
    pub fn with_events(mut self, principal_id: &str, events: Vec<CandidateEvent>) -> Self {
        self.events.insert(principal_id.to_string(), events);
        self
    }

    pub fn with_failure(mut self, principal_id: &str) -> Self {
        self.failing.push(principal_id.to_string());
        self
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for InMemoryEvents {
    async fn find_marked_events(
        &self,
        _token: &AccessToken,
        principal: &Principal,
        _now_utc: DateTime<Utc>,
    ) -> Result<Vec<CandidateEvent>> {
        self.queried.lock().unwrap().push(principal.id.clone());
        if self.failing.contains(&principal.id) {
            return Err(PresenceSyncError::Transport(format!(
                "HTTP 404 MailboxNotEnabledForRESTAPI for {}",
                principal.id
            )));
        }
        Ok(self.events.get(&principal.id).cloned().unwrap_or_default())
    }
}

/// Presence port recording every command; users in `rejecting` get a
/// dispatch error.
#[derive(Default, Clone)]
pub struct RecordingPresence {
    commands: Arc<Mutex<Vec<PresenceCommand>>>,
    rejecting: Vec<String>,
}

impl RecordingPresence {
    pub fn rejecting(user_id: &str) -> Self {
        Self { rejecting: vec![user_id.to_string()], ..Self::default() }
    }

    pub fn commands(&self) -> Vec<PresenceCommand> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl PresencePort for RecordingPresence {
    async fn apply(&self, _token: &AccessToken, command: &PresenceCommand) -> Result<()> {
        self.commands.lock().unwrap().push(command.clone());
        if self.rejecting.contains(&command.user_id) {
            return Err(PresenceSyncError::Dispatch("HTTP 403 Forbidden".into()));
        }
        Ok(())
    }
}

/// Marked event starting `lead_minutes` after `now`, in UTC wall-clock.
pub fn marked_event(
    subject: &str,
    now: NaiveDateTime,
    lead_minutes: i64,
    duration_minutes: i64,
    zone: &str,
) -> CandidateEvent {
    let start = now + Duration::minutes(lead_minutes);
    CandidateEvent {
        id: Some(format!("{subject}-{lead_minutes}")),
        subject: subject.to_string(),
        start_instant: start,
        end_instant: start + Duration::minutes(duration_minutes),
        original_time_zone_id: zone.to_string(),
    }
}
