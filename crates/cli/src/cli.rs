//! Command-line flags

use std::path::PathBuf;

use clap::Parser;

/// Run one calendar-driven presence pass over every user in the tenant
#[derive(Debug, Clone, Parser)]
#[command(name = "presencesync", version, about)]
pub struct Args {
    /// Config file (JSON or TOML); without it the `PRESENCESYNC_*`
    /// environment is used, then the standard file locations
    #[arg(long, value_name = "PATH", env = "PRESENCESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Evaluate and log decisions without setting presence
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "PRESENCESYNC_JSON_LOGS")]
    pub json_logs: bool,
}
