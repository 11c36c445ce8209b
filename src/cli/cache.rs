//! Handler for the `clear-cache` command.

use std::path::Path;

use crate::adapter::outbound::JsonFileStore;
use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::SnapshotStore;

/// Delete the snapshot file named by the configuration.
///
/// A missing configuration file falls back to the defaults so the cache can
/// be cleared without one.
pub async fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = if path.exists() {
        Config::load(path)?
    } else {
        Config::parse_toml("")?
    };

    let store = JsonFileStore::new(config.storage.snapshot_path());
    let existed = store.path().exists();
    store.clear().await?;

    if existed {
        output::ok(&format!("Removed {}", store.path().display()));
    } else {
        output::note(&format!("No snapshot at {}", store.path().display()));
    }
    Ok(())
}
