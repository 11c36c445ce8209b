//! JSON file snapshot store.
//!
//! Keeps the whole record collection in one JSON file. Writes go to a
//! sibling temp file which is synced and then renamed over the target, so
//! a reader never sees a half-written snapshot.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{MergedRecord, OddsQuote};
use crate::error::{Error, Result};
use crate::port::SnapshotStore;

/// Well-known snapshot file name.
pub const SNAPSHOT_FILE_NAME: &str = "cached_events.json";

/// Default snapshot location: `<platform cache dir>/oddsync/cached_events.json`.
///
/// Falls back to the working directory when the platform has no cache dir.
#[must_use]
pub fn default_snapshot_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("oddsync"))
        .unwrap_or_default()
        .join(SNAPSHOT_FILE_NAME)
}

/// [`SnapshotStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Option<Vec<MergedRecord>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read snapshot");
                return None;
            }
        };

        let records: Vec<MergedRecord> = match serde_json::from_slice(&content) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Snapshot is not decodable");
                return None;
            }
        };

        // Field-level decoding checks neither odds values nor the event/quote pairing.
        let mut validated = Vec::with_capacity(records.len());
        for record in records {
            let odds = record.odds();
            let checked = OddsQuote::try_new(odds.event_id(), odds.odds_a(), odds.odds_b())
                .and_then(|odds| MergedRecord::try_new(record.event().clone(), odds));
            match checked {
                Ok(record) => validated.push(record),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Snapshot is inconsistent");
                    return None;
                }
            }
        }
        Some(validated)
    }

    fn write(path: &Path, json: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, path).map_err(cleanup_and_err)?;
        Ok(())
    }

    fn remove(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Option<Vec<MergedRecord>> {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || Self::read(&path)).await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Snapshot read task failed");
                None
            }
        }
    }

    async fn save(&self, records: &[MergedRecord]) -> Result<()> {
        let json = serde_json::to_vec(records)?;
        let path = self.path.clone();
        let bytes = json.len();
        tokio::task::spawn_blocking(move || Self::write(&path, &json))
            .await
            .map_err(|err| Error::Io(std::io::Error::other(err)))??;
        debug!(path = %self.path.display(), bytes, "Snapshot saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::remove(&path))
            .await
            .map_err(|err| Error::Io(std::io::Error::other(err)))?
    }
}
