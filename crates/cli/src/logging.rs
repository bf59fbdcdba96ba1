//! Tracing subscriber setup

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` overrides the `info` default.
///
/// Returns `false` when a global subscriber was already installed (tests,
/// embedders); that subscriber is kept.
pub fn init_tracing(json: bool) -> bool {
    let env_filter =
        EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false);

    let installed = if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.compact().try_init()
    };

    match installed {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "global subscriber already installed, keeping it");
            false
        }
    }
}
