//! Application configuration loaded from environment variables.
//!
//! Every variable is optional and falls back to a built-in default:
//! - `EXPO_API_BASE_URL` : root of the exhibitor order service
//! - `EXPO_POLL_INTERVAL_SECS` : background refresh period (default 120)
//! - `EXPO_CACHE_TTL_SECS` : how long a snapshot may be reused (default 30)
//! - `EXPO_REQUEST_TIMEOUT_SECS` : per-request HTTP timeout (default 15)
//! - `EXPO_LOG_FILE` : log destination while the TUI owns the terminal
//!
//! Empty values are treated as absent.

use std::path::PathBuf;
use std::time::Duration;

/// Default order service endpoint.
const DEFAULT_API_BASE_URL: &str = "https://exhibitor-backend.onrender.com/api";

/// Polling period used while an exhibitor is selected.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 120;

const DEFAULT_CACHE_TTL_SECS: u64 = 30;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

const DEFAULT_LOG_FILE: &str = "expotrack.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub log_file: PathBuf,
}

/// Remote service settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Synchronization timing.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    pub poll_interval: Duration,
    /// Zero disables snapshot reuse; every sync then hits the network.
    pub cache_ttl: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TrackerError::Config`](crate::TrackerError::Config) if the
/// base URL is not an http(s) URL, if a numeric variable does not parse,
/// or if the poll interval or request timeout is zero.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url =
        non_empty_var("EXPO_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    validate_base_url(&base_url)?;

    let poll_interval = secs_var("EXPO_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
    if poll_interval.is_zero() {
        return Err(crate::TrackerError::Config(
            "EXPO_POLL_INTERVAL_SECS must be greater than zero".to_string(),
        ));
    }

    let cache_ttl = secs_var("EXPO_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

    let request_timeout = secs_var("EXPO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    if request_timeout.is_zero() {
        return Err(crate::TrackerError::Config(
            "EXPO_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
        ));
    }

    let log_file = non_empty_var("EXPO_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            request_timeout,
        },
        sync: SyncConfig {
            poll_interval,
            cache_ttl,
        },
        log_file,
    })
}

/// Checks that `url` parses and uses an http(s) scheme.
///
/// # Errors
///
/// Returns [`TrackerError::Config`](crate::TrackerError::Config) otherwise.
pub fn validate_base_url(url: &str) -> crate::Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| crate::TrackerError::Config(format!("invalid API base URL {url:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(crate::TrackerError::Config(format!(
            "API base URL must use http or https, got {other:?}"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads a whole-seconds duration, falling back to `default` when unset.
fn secs_var(name: &str, default: u64) -> crate::Result<Duration> {
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| crate::TrackerError::Config(format!("{name}={raw:?} is not a number: {e}"))),
        None => Ok(Duration::from_secs(default)),
    }
}
