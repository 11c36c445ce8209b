//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::time::Duration;

use crate::application::SyncSettings;
use crate::infrastructure::config::reconnection::ReconnectionConfig;

/// Fast reconnection config with zero delays, no waiting in tests.
pub fn reconnection() -> ReconnectionConfig {
    ReconnectionConfig {
        initial_delay_ms: 0,
        max_delay_ms: 0,
        backoff_multiplier: 1.0,
        max_consecutive_failures: 3,
        circuit_breaker_cooldown_ms: 0,
    }
}

/// Orchestrator settings with the given page size and a checkpoint interval
/// long enough never to fire during a test.
pub fn sync(page_size: usize) -> SyncSettings {
    SyncSettings {
        page_size,
        checkpoint_interval: Duration::from_secs(3600),
        event_capacity: 256,
    }
}
