//! Feed synchronization and bulk fetch settings.

use std::time::Duration;

use serde::Deserialize;

use crate::application::fetch::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::application::pagination::DEFAULT_PAGE_SIZE;
use crate::application::SyncSettings;

/// `[sync]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Seconds between checkpoints while loaded.
    #[serde(default = "default_checkpoint_interval_secs")]
    pub checkpoint_interval_secs: u64,
    /// Capacity of the feed notification channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_checkpoint_interval_secs() -> u64 {
    10
}

const fn default_event_capacity() -> usize {
    1024
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            checkpoint_interval_secs: default_checkpoint_interval_secs(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl From<&SyncConfig> for SyncSettings {
    fn from(config: &SyncConfig) -> Self {
        Self {
            page_size: config.page_size,
            checkpoint_interval: Duration::from_secs(config.checkpoint_interval_secs),
            event_capacity: config.event_capacity,
        }
    }
}

/// `[fetch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Attempts per bulk call, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    #[serde(default)]
    pub backoff_ms: u64,
}

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: 0,
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_ms: config.backoff_ms,
        }
    }
}
