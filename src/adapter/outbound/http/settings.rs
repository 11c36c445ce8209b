//! HTTP event source configuration.

use serde::Deserialize;

/// Remote read API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSourceConfig {
    /// Base URL, e.g. `https://feed.example.com/api`.
    /// Overridden by `ODDSYNC_SOURCE_URL` when set.
    #[serde(default)]
    pub base_url: String,
    /// Path of the events collection.
    #[serde(default = "default_events_path")]
    pub events_path: String,
    /// Path of the odds collection.
    #[serde(default = "default_odds_path")]
    pub odds_path: String,
    /// Path that resets server-side state; reset is a no-op when unset.
    #[serde(default)]
    pub reset_path: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_events_path() -> String {
    "/events".into()
}

fn default_odds_path() -> String {
    "/odds".into()
}

const fn default_timeout_ms() -> u64 {
    5000
}

const fn default_connect_timeout_ms() -> u64 {
    2000
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            events_path: default_events_path(),
            odds_path: default_odds_path(),
            reset_path: None,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
