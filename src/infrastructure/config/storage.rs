//! Snapshot storage settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::outbound::file::default_snapshot_path;

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file. Defaults to the platform cache directory.
    /// Overridden by `ODDSYNC_CACHE_PATH` when set.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Effective snapshot file path.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_snapshot_path)
    }
}
