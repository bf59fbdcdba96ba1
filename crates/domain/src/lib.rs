//! # PresenceSync Domain
//!
//! Business domain types for the calendar-driven presence engine.
//!
//! This crate contains:
//! - Principals, calendar events and presence commands
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Time zone identifier resolution
//!
//! ## Architecture
//! - No dependencies on other PresenceSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::time_zones::resolve_time_zone;
