//! Demo source configuration.

use serde::Deserialize;

/// Size of the generated demo data set.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSourceConfig {
    /// Number of events generated on start and on every reset.
    #[serde(default = "default_event_count")]
    pub event_count: usize,
}

const fn default_event_count() -> usize {
    100
}

impl Default for DemoSourceConfig {
    fn default() -> Self {
        Self {
            event_count: default_event_count(),
        }
    }
}
