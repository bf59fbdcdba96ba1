//! Presence pass service - drives one complete pass
//!
//! Enumerate principals → fetch marked events → normalize → decide →
//! dispatch. Principals and events are handled strictly one at a time.
//!
//! Fault scopes:
//! - credential or directory failure aborts the pass
//! - an event query failure skips the principal
//! - an unresolvable time zone skips the event
//! - a rejected dispatch is counted and the pass moves on

use std::sync::Arc;

use presencesync_domain::{
    AccessToken, CandidateEvent, PassReport, PresenceCommand, Principal, PrincipalFault, Result,
    WindowConfig,
};
use tracing::{debug, info, instrument, warn};

use super::decision::WindowDecisionEngine;
use super::normalizer::TimeNormalizer;
use super::ports::{Clock, CredentialProvider, DirectoryPort, EventSource, PresencePort, SystemClock};

/// Orchestrates a single presence override pass
pub struct PresencePassService {
    credentials: Arc<dyn CredentialProvider>,
    directory: Arc<dyn DirectoryPort>,
    events: Arc<dyn EventSource>,
    presence: Arc<dyn PresencePort>,
    clock: Arc<dyn Clock>,
    normalizer: TimeNormalizer,
    engine: WindowDecisionEngine,
    dry_run: bool,
}

impl PresencePassService {
    /// Create a new pass service using the system clock
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        directory: Arc<dyn DirectoryPort>,
        events: Arc<dyn EventSource>,
        presence: Arc<dyn PresencePort>,
        window: &WindowConfig,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            credentials,
            directory,
            events,
            presence,
            normalizer: TimeNormalizer::new(clock.clone()),
            clock,
            engine: WindowDecisionEngine::from_config(window),
            dry_run: false,
        }
    }

    /// Replace the clock used for event queries and normalization
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.normalizer = TimeNormalizer::new(clock.clone());
        self.clock = clock;
        self
    }

    /// Evaluate and log decisions without calling the presence endpoint
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Run one pass over every reachable principal.
    ///
    /// # Errors
    /// Returns an error only when the pass cannot start: token acquisition
    /// or principal enumeration failed. Faults inside a principal are
    /// recorded in the returned [`PassReport`].
    #[instrument(skip(self), fields(dry_run = self.dry_run))]
    pub async fn run_pass(&self) -> Result<PassReport> {
        let token = self.credentials.acquire_token().await?;
        debug!(expires_in = token.expires_in, "access token acquired");

        let principals = self.directory.list_principals(&token).await?;
        info!(principals = principals.len(), "principals enumerated");

        let mut report = PassReport::default();

        for principal in &principals {
            report.principals_seen += 1;

            if let Err(err) = self.process_principal(&token, principal, &mut report).await {
                warn!(
                    principal_id = %principal.id,
                    principal = principal.label(),
                    kind = err.label(),
                    error = %err,
                    "skipping principal"
                );
                report.principals_skipped += 1;
                report.faults.push(PrincipalFault {
                    principal_id: principal.id.clone(),
                    kind: err.label().to_string(),
                    message: err.to_string(),
                });
            }
        }

        info!(
            principals_seen = report.principals_seen,
            principals_skipped = report.principals_skipped,
            events_seen = report.events_seen,
            events_skipped = report.events_skipped,
            deferred = report.deferred,
            dispatched = report.dispatched,
            dispatch_failures = report.dispatch_failures,
            dry_run_actions = report.dry_run_actions,
            "presence pass completed"
        );

        Ok(report)
    }

    async fn process_principal(
        &self,
        token: &AccessToken,
        principal: &Principal,
        report: &mut PassReport,
    ) -> Result<()> {
        let events = self.events.find_marked_events(token, principal, self.clock.now()).await?;
        debug!(principal_id = %principal.id, events = events.len(), "marked events fetched");

        for event in &events {
            report.events_seen += 1;
            self.evaluate_event(token, principal, event, report).await;
        }

        Ok(())
    }

    async fn evaluate_event(
        &self,
        token: &AccessToken,
        principal: &Principal,
        event: &CandidateEvent,
        report: &mut PassReport,
    ) {
        let normalized = match self.normalizer.normalize(event) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(
                    principal_id = %principal.id,
                    event_id = event.id.as_deref(),
                    time_zone = %event.original_time_zone_id,
                    error = %err,
                    "skipping event"
                );
                report.events_skipped += 1;
                return;
            }
        };

        let Some(action) = self.engine.decide(&normalized) else {
            debug!(
                principal_id = %principal.id,
                subject = %normalized.subject,
                minutes_until_start = normalized.whole_minutes_until_start(),
                "event outside actionable window"
            );
            report.deferred += 1;
            return;
        };

        let command = PresenceCommand::presenting(principal.id.as_str(), action);

        if self.dry_run {
            info!(
                principal_id = %principal.id,
                subject = %normalized.subject,
                local_start = %normalized.local_start,
                expiration_minutes = command.expiration_minutes,
                "dry run: presence override not dispatched"
            );
            report.dry_run_actions += 1;
            return;
        }

        match self.presence.apply(token, &command).await {
            Ok(()) => {
                info!(
                    principal_id = %principal.id,
                    subject = %normalized.subject,
                    local_start = %normalized.local_start,
                    expiration_minutes = command.expiration_minutes,
                    correlation_id = %command.correlation_id,
                    "presence override dispatched"
                );
                report.dispatched += 1;
            }
            Err(err) => {
                warn!(
                    principal_id = %principal.id,
                    correlation_id = %command.correlation_id,
                    kind = err.label(),
                    error = %err,
                    "presence override failed"
                );
                report.dispatch_failures += 1;
            }
        }
    }
}
