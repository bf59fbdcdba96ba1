//! Domain types and models

pub mod event;
pub mod presence;
pub mod principal;
pub mod report;

pub use event::{CandidateEvent, NormalizedEvent};
pub use presence::{Activity, Availability, PresenceAction, PresenceCommand};
pub use principal::{AccessToken, Principal};
pub use report::{PassReport, PrincipalFault};
