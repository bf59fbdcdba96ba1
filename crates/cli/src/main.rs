//! PresenceSync - calendar-driven presence overrides
//!
//! Runs one pass and exits; schedule it externally (cron, systemd timer,
//! Azure Functions timer trigger).

use std::process::ExitCode;

use clap::Parser;
use presencesync_cli::{exit_code, logging, run, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    logging::init_tracing(args.json_logs);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "could not load .env file"),
    }

    let outcome = run(&args).await;
    if let Err(err) = &outcome {
        tracing::error!(error = %format!("{err:#}"), "presence pass aborted");
    }

    exit_code(&outcome)
}
