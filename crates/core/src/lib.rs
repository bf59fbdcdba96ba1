//! # PresenceSync Core
//!
//! Pure decision logic for the presence override pass.
//!
//! This crate contains:
//! - Port interfaces (traits) for credentials, directory, events and presence
//! - The time normalizer and window decision engine
//! - The pass service that drives one enumerate → evaluate → dispatch run
//!
//! ## Architecture Principles
//! - Only depends on `presencesync-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod presence;

pub use presence::decision::WindowDecisionEngine;
pub use presence::normalizer::TimeNormalizer;
pub use presence::ports::{
    Clock, CredentialProvider, DirectoryPort, EventSource, PresencePort, SystemClock,
};
pub use presence::service::PresencePassService;
