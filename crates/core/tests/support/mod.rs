//! Shared test helpers for `presencesync-core` integration tests.
//!
//! In-memory port fakes so pass tests can focus on behaviour instead of
//! HTTP plumbing.

pub mod ports;
