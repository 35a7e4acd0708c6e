//! Configuration management.
//!
//! Configuration is a JSON file; every field has a default, and a missing
//! file means "all defaults". Command-line flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use outage_core::parse_timestamp;
use outage_fetch::RetryPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Upstream service root.
pub const DEFAULT_BASE_URL: &str = "https://api.krakenflex.systems/interview-tests-mock-api/v1/";

/// Site reported on by default.
pub const DEFAULT_SITE_ID: &str = "norwich-pear-tree";

/// Outages beginning before this are ignored.
pub const DEFAULT_CUTOFF: &str = "2022-01-01T00:00:00.000Z";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Upstream service root URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Site to report on.
    #[serde(default = "default_site_id")]
    pub site_id: String,
    /// Earliest outage begin time to report (ISO-8601).
    #[serde(default = "default_cutoff")]
    pub cutoff: String,
    /// File holding the API key.
    #[serde(default = "default_api_key_file")]
    pub api_key_file: PathBuf,
    /// Retries after an HTTP 500.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff step between retries, in seconds.
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: f64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_site_id() -> String {
    DEFAULT_SITE_ID.to_string()
}

fn default_cutoff() -> String {
    DEFAULT_CUTOFF.to_string()
}

fn default_api_key_file() -> PathBuf {
    PathBuf::from("api-key.txt")
}

fn default_max_retries() -> u32 {
    outage_fetch::retry::DEFAULT_MAX_RETRIES
}

fn default_backoff_secs() -> f64 {
    outage_fetch::retry::DEFAULT_BACKOFF_UNIT.as_secs_f64()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_id: default_site_id(),
            cutoff: default_cutoff(),
            api_key_file: default_api_key_file(),
            max_retries: default_max_retries(),
            backoff_secs: default_backoff_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("outage-report")
            .join("config.json")
    }

    /// Loads configuration from `path`, or the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        parse_timestamp(&self.cutoff).context("invalid cutoff")?;
        if self.site_id.trim().is_empty() {
            bail!("site id must not be empty");
        }
        if !self.backoff_secs.is_finite() || self.backoff_secs < 0.0 {
            bail!("backoff_secs must be a non-negative number, got {}", self.backoff_secs);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Retry policy described by this configuration.
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let unit = Duration::try_from_secs_f64(self.backoff_secs)
            .with_context(|| format!("invalid backoff_secs {}", self.backoff_secs))?;
        Ok(RetryPolicy::new(self.max_retries).with_backoff_unit(unit))
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
