//! # PresenceSync Runner
//!
//! Command-line entry point executing a single presence pass.
//!
//! - [`cli::Args`]: command-line flags
//! - [`logging`]: tracing subscriber setup
//! - [`context::PresenceContext`]: wires configuration into the adapters

pub mod cli;
pub mod context;
pub mod logging;

use std::process::ExitCode;

use presencesync_domain::PassReport;

pub use cli::Args;
pub use context::PresenceContext;

/// Load configuration, build the context and run one pass.
///
/// # Errors
/// Fails on invalid configuration, token acquisition failure or when the
/// principal directory cannot be listed. Per-principal faults are carried in
/// the returned report.
pub async fn run(args: &Args) -> anyhow::Result<PassReport> {
    let config = context::load_config(args.config.clone())?;
    let context = PresenceContext::new(config, args.dry_run)?;
    let report = context.service.run_pass().await?;
    Ok(report)
}

/// Map a pass outcome to the process exit code.
pub fn exit_code(outcome: &anyhow::Result<PassReport>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
