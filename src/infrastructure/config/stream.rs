//! Odds stream settings.

use serde::Deserialize;

/// `[stream]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Milliseconds between demo batches.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Upper bound on quotes per demo batch.
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
    /// Wrap the stream with automatic reconnection.
    #[serde(default = "default_true")]
    pub reconnect: bool,
}

const fn default_tick_ms() -> u64 {
    1000
}

const fn default_max_batch() -> usize {
    10
}

const fn default_true() -> bool {
    true
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            max_batch: default_max_batch(),
            reconnect: default_true(),
        }
    }
}
