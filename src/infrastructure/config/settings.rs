//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; `ODDSYNC_SOURCE_URL` and
//! `ODDSYNC_CACHE_PATH` override the source URL and snapshot path.
//!
//! # Example
//!
//! ```no_run
//! use oddsync::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::reconnection::ReconnectionConfig;
use super::storage::StorageConfig;
use super::stream::StreamConfig;
use super::sync::{FetchConfig, SyncConfig};
use crate::adapter::outbound::demo::DemoSourceConfig;
use crate::adapter::outbound::http::HttpSourceConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding the HTTP source base URL.
pub const SOURCE_URL_ENV: &str = "ODDSYNC_SOURCE_URL";
/// Environment variable overriding the snapshot file path.
pub const CACHE_PATH_ENV: &str = "ODDSYNC_CACHE_PATH";

/// Bulk event source selection.
///
/// The active variant is determined by the `type` field of `[source]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Generated in-process data.
    Demo(DemoSourceConfig),
    /// Remote read API.
    Http(HttpSourceConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Demo(DemoSourceConfig::default())
    }
}

impl SourceConfig {
    /// Name used in logs and `check-config` output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Demo(_) => "demo",
            Self::Http(_) => "http",
        }
    }
}

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Paging and checkpoint settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Bulk fetch retry settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Where events and odds come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Odds stream settings.
    #[serde(default)]
    pub stream: StreamConfig,

    /// Stream reconnection settings.
    ///
    /// Only used when `stream.reconnect` is enabled.
    #[serde(default)]
    pub reconnection: ReconnectionConfig,

    /// Snapshot storage.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(
            std::env::var(SOURCE_URL_ENV).ok(),
            std::env::var(CACHE_PATH_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply override values (normally read from the environment).
    ///
    /// Empty values are ignored. A source URL only applies to an HTTP source.
    pub fn apply_overrides(&mut self, source_url: Option<String>, cache_path: Option<String>) {
        if let (Some(url), SourceConfig::Http(http)) =
            (source_url.filter(|url| !url.is_empty()), &mut self.source)
        {
            http.base_url = url;
        }
        if let Some(path) = cache_path.filter(|path| !path.is_empty()) {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(invalid("level", "must not be empty"));
        }
        if self.sync.page_size == 0 {
            return Err(invalid("page_size", "must be greater than 0"));
        }
        if self.sync.checkpoint_interval_secs == 0 {
            return Err(invalid("checkpoint_interval_secs", "must be greater than 0"));
        }
        if self.sync.event_capacity == 0 {
            return Err(invalid("event_capacity", "must be greater than 0"));
        }
        if self.fetch.max_attempts == 0 {
            return Err(invalid("max_attempts", "must be greater than 0"));
        }

        if let SourceConfig::Http(http) = &self.source {
            if http.base_url.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "base_url" }.into());
            }
            if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
                return Err(invalid("timeout_ms", "timeouts must be greater than 0"));
            }
        }

        if self.stream.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be greater than 0"));
        }
        if self.stream.max_batch == 0 {
            return Err(invalid("max_batch", "must be greater than 0"));
        }

        if self.stream.reconnect {
            let reconnection = &self.reconnection;
            if reconnection.max_delay_ms < reconnection.initial_delay_ms {
                return Err(invalid("max_delay_ms", "must be >= initial_delay_ms"));
            }
            if reconnection.backoff_multiplier < 1.0 {
                return Err(invalid("backoff_multiplier", "must be >= 1.0"));
            }
            if reconnection.max_consecutive_failures == 0 {
                return Err(invalid("max_consecutive_failures", "must be greater than 0"));
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
