//! Logging configuration and subscriber setup.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// The `[logging]` section.
///
/// `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `oddsync=debug,reqwest=warn`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Apply command-line overrides on top of the file settings.
    pub fn override_with(&mut self, level: Option<&str>, json: bool) {
        if let Some(level) = level {
            self.level = level.to_string();
        }
        if json {
            self.format = LogFormat::Json;
        }
    }

    /// Filter from `RUST_LOG`, or from `level` when unset or unparsable.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global tracing subscriber.
    ///
    /// A second call in the same process leaves the first subscriber in place.
    pub fn init(&self) {
        let builder = fmt().with_env_filter(self.filter()).with_target(true);
        let installed = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Tracing subscriber already installed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> LoggingConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_format_names_are_lowercase() {
        assert_eq!(parse("format = \"json\"").format, LogFormat::Json);
        assert_eq!(parse("format = \"pretty\"").format, LogFormat::Pretty);
        assert!(toml::from_str::<LoggingConfig>("format = \"Json\"").is_err());
    }

    #[test]
    fn test_partial_section_keeps_other_default() {
        let config = parse("level = \"debug\"");
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_override_with_flags() {
        let mut config = parse("level = \"warn\"");

        config.override_with(None, false);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);

        config.override_with(Some("trace"), true);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        config.init();
        config.init();
    }
}
