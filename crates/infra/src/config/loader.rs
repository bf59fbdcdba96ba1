//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when every required one is present
//! 2. Otherwise a JSON or TOML file (explicit path or probed)
//! 3. A file without `app_secret` takes it from `PRESENCESYNC_APP_SECRET`
//!
//! ## Environment Variables
//! Required:
//! - `PRESENCESYNC_TENANT_ID`
//! - `PRESENCESYNC_APP_ID`
//! - `PRESENCESYNC_APP_SECRET`
//! - `PRESENCESYNC_MARKER_SUBJECT`
//!
//! Optional (defaults in `presencesync_domain::constants`):
//! - `PRESENCESYNC_GRAPH_BASE_URL`
//! - `PRESENCESYNC_AUTHORITY_URL`
//! - `PRESENCESYNC_PAGE_DELAY_SECONDS`
//! - `PRESENCESYNC_REQUEST_TIMEOUT_SECONDS`
//! - `PRESENCESYNC_LOOKAHEAD_MINUTES`
//! - `PRESENCESYNC_ACTION_THRESHOLD_MINUTES`
//! - `PRESENCESYNC_MAX_OVERRIDE_MINUTES`
//!
//! ## File Locations
//! `presencesync.{json,toml}` then `config.{json,toml}`, first in the
//! working directory, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use presencesync_domain::{
    Config, GraphConfig, PresenceSyncError, Result, TenantConfig, WindowConfig,
};

const ENV_PREFIX: &str = "PRESENCESYNC_";
const CONFIG_FILE_NAMES: [&str; 4] =
    ["presencesync.json", "presencesync.toml", "config.json", "config.toml"];

/// Load configuration, preferring the environment over files.
///
/// # Errors
/// Returns `PresenceSyncError::Config` when neither source yields a
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment");
            Ok(config)
        }
        Err(err) => {
            tracing::debug!(error = %err, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `PRESENCESYNC_*` variables.
///
/// # Errors
/// Returns `PresenceSyncError::Config` if a required variable is missing or
/// a numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let tenant = TenantConfig {
        tenant_id: env_var("TENANT_ID")?,
        app_id: env_var("APP_ID")?,
        app_secret: env_var("APP_SECRET")?,
    };

    let graph_defaults = GraphConfig::default();
    let graph = GraphConfig {
        base_url: optional_env("GRAPH_BASE_URL").unwrap_or(graph_defaults.base_url),
        authority_url: optional_env("AUTHORITY_URL").unwrap_or(graph_defaults.authority_url),
        page_delay_seconds: env_parse("PAGE_DELAY_SECONDS", graph_defaults.page_delay_seconds)?,
        request_timeout_seconds: env_parse(
            "REQUEST_TIMEOUT_SECONDS",
            graph_defaults.request_timeout_seconds,
        )?,
    };

    let window_defaults = WindowConfig::default();
    let window = WindowConfig {
        marker_subject: env_var("MARKER_SUBJECT")?,
        lookahead_minutes: env_parse("LOOKAHEAD_MINUTES", window_defaults.lookahead_minutes)?,
        action_threshold_minutes: env_parse(
            "ACTION_THRESHOLD_MINUTES",
            window_defaults.action_threshold_minutes,
        )?,
        max_override_minutes: env_parse(
            "MAX_OVERRIDE_MINUTES",
            window_defaults.max_override_minutes,
        )?,
    };

    Ok(Config { tenant, graph, window })
}

/// Load configuration from a file.
///
/// If `path` is `None`, the standard locations are probed with
/// [`probe_config_paths`].
///
/// # Errors
/// Returns `PresenceSyncError::Config` if the file is missing, unreadable or
/// not valid JSON/TOML for [`Config`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PresenceSyncError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PresenceSyncError::Config(
                "no config file found and PRESENCESYNC_* environment incomplete".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PresenceSyncError::Config(format!("failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    if config.tenant.app_secret.is_empty() {
        if let Some(secret) = optional_env("APP_SECRET") {
            config.tenant.app_secret = secret;
        }
    }
    Ok(config)
}

/// Parse by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PresenceSyncError::Config(format!("invalid TOML config: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PresenceSyncError::Config(format!("invalid JSON config: {e}"))),
        _ => Err(PresenceSyncError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory, then next to the
/// executable.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Required variable; blank counts as missing.
fn env_var(suffix: &str) -> Result<String> {
    optional_env(suffix).ok_or_else(|| {
        PresenceSyncError::Config(format!(
            "missing required environment variable: {}",
            env_key(suffix)
        ))
    })
}

fn optional_env(suffix: &str) -> Option<String> {
    std::env::var(env_key(suffix)).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(suffix: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(suffix) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| {
            PresenceSyncError::Config(format!("invalid {}='{raw}': {e}", env_key(suffix)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_KEYS: [&str; 11] = [
        "TENANT_ID",
        "APP_ID",
        "APP_SECRET",
        "MARKER_SUBJECT",
        "GRAPH_BASE_URL",
        "AUTHORITY_URL",
        "PAGE_DELAY_SECONDS",
        "REQUEST_TIMEOUT_SECONDS",
        "LOOKAHEAD_MINUTES",
        "ACTION_THRESHOLD_MINUTES",
        "MAX_OVERRIDE_MINUTES",
    ];

    fn clear_env() {
        for key in ALL_KEYS {
            std::env::remove_var(env_key(key));
        }
    }

    fn set_required() {
        std::env::set_var("PRESENCESYNC_TENANT_ID", "contoso");
        std::env::set_var("PRESENCESYNC_APP_ID", "app-123");
        std::env::set_var("PRESENCESYNC_APP_SECRET", "s3cret");
        std::env::set_var("PRESENCESYNC_MARKER_SUBJECT", "Focus Time");
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn env_with_required_vars_uses_defaults_for_the_rest() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();

        let config = load_from_env().unwrap();
        assert_eq!(config.tenant.tenant_id, "contoso");
        assert_eq!(config.window.marker_subject, "Focus Time");
        assert_eq!(config.graph.base_url, "https://graph.microsoft.com/v1.0");
        assert_eq!(config.graph.page_delay_seconds, 3);
        assert_eq!(config.window.action_threshold_minutes, 5);
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    fn env_overrides_optional_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::set_var("PRESENCESYNC_PAGE_DELAY_SECONDS", "0");
        std::env::set_var("PRESENCESYNC_MAX_OVERRIDE_MINUTES", "120");
        std::env::set_var("PRESENCESYNC_GRAPH_BASE_URL", "http://127.0.0.1:9000/v1.0");

        let config = load_from_env().unwrap();
        assert_eq!(config.graph.page_delay_seconds, 0);
        assert_eq!(config.window.max_override_minutes, 120);
        assert_eq!(config.graph.base_url, "http://127.0.0.1:9000/v1.0");

        clear_env();
    }

    #[test]
    fn env_missing_marker_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::set_var("PRESENCESYNC_MARKER_SUBJECT", "   ");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, PresenceSyncError::Config(ref msg) if msg.contains("MARKER_SUBJECT")));

        clear_env();
    }

    #[test]
    fn env_non_numeric_value_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::set_var("PRESENCESYNC_LOOKAHEAD_MINUTES", "an hour");

        assert!(matches!(load_from_env(), Err(PresenceSyncError::Config(_))));

        clear_env();
    }

    #[test]
    fn toml_file_without_secret_takes_it_from_env() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("PRESENCESYNC_APP_SECRET", "from-env");

        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "presencesync.toml",
            r#"
[tenant]
tenant_id = "contoso"
app_id = "app-123"

[window]
marker_subject = "Focus Time"
"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.tenant.app_secret, "from-env");
        assert_eq!(config.window.lookahead_minutes, 60);

        clear_env();
    }

    #[test]
    fn json_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "config.json",
            r#"{
                "tenant": {"tenant_id": "contoso", "app_id": "app-123", "app_secret": "s"},
                "graph": {"page_delay_seconds": 1},
                "window": {"marker_subject": "Demo", "action_threshold_minutes": 10}
            }"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.graph.page_delay_seconds, 1);
        assert_eq!(config.graph.request_timeout_seconds, 30);
        assert_eq!(config.window.action_threshold_minutes, 10);
    }

    #[test]
    fn missing_file_is_config_error() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/presencesync.toml")));
        assert!(matches!(result, Err(PresenceSyncError::Config(_))));
    }

    #[test]
    fn invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "config.json", r#"{ "tenant": "#);
        assert!(matches!(load_from_file(Some(path)), Err(PresenceSyncError::Config(_))));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = parse_config("tenant: x", Path::new("presencesync.yaml"));
        assert!(matches!(result, Err(PresenceSyncError::Config(ref msg)) if msg.contains("yaml")));
    }
}
