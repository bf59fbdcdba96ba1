//! # PresenceSync Infrastructure
//!
//! Infrastructure implementations of the core presence ports.
//!
//! This crate contains:
//! - HTTP client and the paginated Graph fetcher
//! - Microsoft Graph adapters (directory, calendar events, presence)
//! - Client-credentials token provider
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `presencesync-core`
//! - Contains all "impure" code (network, environment, files)

pub mod auth;
pub mod config;
pub mod errors;
pub mod graph;
pub mod http;

// Re-export commonly used items
pub use auth::ClientCredentialsProvider;
pub use errors::InfraError;
pub use graph::{
    GraphDirectory, GraphEventSource, GraphPresenceDispatcher, PaginatedFetcher, Throttle,
    TokioThrottle,
};
pub use http::{HttpClient, HttpClientBuilder};
