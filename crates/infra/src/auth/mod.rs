//! Application credentials
//!
//! The engine authenticates as itself (no signed-in user); the token is
//! requested once per pass.

pub mod client_credentials;

pub use client_credentials::ClientCredentialsProvider;
