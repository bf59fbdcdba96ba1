//! Pass context - wires configuration into the Graph adapters

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use presencesync_core::PresencePassService;
use presencesync_domain::Config;
use presencesync_infra::{
    config, ClientCredentialsProvider, GraphDirectory, GraphEventSource, GraphPresenceDispatcher,
    HttpClient, PaginatedFetcher, Throttle,
};

/// Load and validate configuration.
///
/// An explicit path wins; otherwise environment first, then probed files.
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Everything one pass needs
pub struct PresenceContext {
    pub config: Config,
    pub service: PresencePassService,
}

impl PresenceContext {
    /// Build the adapters and the pass service from `config`.
    pub fn new(config: Config, dry_run: bool) -> anyhow::Result<Self> {
        Self::build(config, dry_run, None)
    }

    /// Same as [`new`](Self::new) with a replacement page throttle.
    pub fn with_throttle(
        config: Config,
        dry_run: bool,
        throttle: Arc<dyn Throttle>,
    ) -> anyhow::Result<Self> {
        Self::build(config, dry_run, Some(throttle))
    }

    fn build(
        config: Config,
        dry_run: bool,
        throttle: Option<Arc<dyn Throttle>>,
    ) -> anyhow::Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.graph.request_timeout_seconds))
            .build()
            .context("failed to build HTTP client")?;

        let mut fetcher =
            PaginatedFetcher::new(http.clone(), Duration::from_secs(config.graph.page_delay_seconds));
        if let Some(throttle) = throttle {
            fetcher = fetcher.with_throttle(throttle);
        }

        let credentials = ClientCredentialsProvider::from_config(http.clone(), &config);
        let directory = GraphDirectory::new(fetcher.clone(), config.graph.base_url.clone());
        let events =
            GraphEventSource::from_config(fetcher, config.graph.base_url.clone(), &config.window);
        let presence = GraphPresenceDispatcher::new(
            http,
            config.graph.base_url.clone(),
            config.tenant.app_id.clone(),
        );

        let service = PresencePassService::new(
            Arc::new(credentials),
            Arc::new(directory),
            Arc::new(events),
            Arc::new(presence),
            &config.window,
        )
        .with_dry_run(dry_run);

        tracing::debug!(
            tenant_id = %config.tenant.tenant_id,
            marker_subject = %config.window.marker_subject,
            dry_run,
            "pass context ready"
        );

        Ok(Self { config, service })
    }
}
