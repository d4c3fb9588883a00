//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use boxscout_api::discover::PagePolicy;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Discovery pacing settings.
    #[serde(default)]
    pub discover: DiscoverConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// TMDB API configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the TMDB v3 API.
    pub base_url: Option<String>,
    /// Minimum interval between two requests, in milliseconds.
    pub min_interval_ms: Option<u64>,
}

/// Discovery pacing configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct DiscoverConfig {
    /// Pause between two page fetches, in milliseconds.
    pub page_delay_ms: Option<u64>,
    /// Retries of a failed page before discovery stops.
    pub page_retries: Option<u32>,
    /// Linear backoff unit between page retries, in milliseconds.
    pub retry_backoff_ms: Option<u64>,
}

/// CSV export configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory the CSV file is written to.
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Page policy with configured values layered over the defaults.
    #[must_use]
    pub fn page_policy(&self) -> PagePolicy {
        let defaults = PagePolicy::default();
        PagePolicy {
            page_delay: self
                .discover
                .page_delay_ms
                .map_or(defaults.page_delay, Duration::from_millis),
            page_retries: self.discover.page_retries.unwrap_or(defaults.page_retries),
            retry_backoff: self
                .discover
                .retry_backoff_ms
                .map_or(defaults.retry_backoff, Duration::from_millis),
        }
    }

    /// Configured minimum request interval, if any.
    #[must_use]
    pub fn min_interval(&self) -> Option<Duration> {
        self.api.min_interval_ms.map(Duration::from_millis)
    }
}
