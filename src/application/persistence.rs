//! Persistence gateway in front of a [`SnapshotStore`].
//!
//! Serializes every write (checkpoint or clear) through one async mutex and
//! checks the feed generation under that mutex, so a checkpoint taken before
//! a reset can never be written after the reset's `clear()`. All failures are
//! logged and absorbed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::MergedRecord;
use crate::port::SnapshotStore;

pub struct PersistenceGateway {
    store: Arc<dyn SnapshotStore>,
    generation: AtomicU64,
    write_lock: Mutex<()>,
}

impl PersistenceGateway {
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Generation that checkpoints must match to be written.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Publish the feed's current generation.
    pub fn set_generation(&self, generation: u64) {
        self.generation.store(generation, Ordering::SeqCst);
    }

    /// Load the stored snapshot, `None` when absent or undecodable.
    pub async fn load(&self) -> Option<Vec<MergedRecord>> {
        let records = self.store.load().await;
        debug!(
            records = records.as_ref().map_or(0, Vec::len),
            "Snapshot loaded"
        );
        records
    }

    /// Write a checkpoint taken at `generation`.
    ///
    /// Skipped when `records` is empty or the generation has moved on.
    /// Returns whether the snapshot was written.
    pub async fn checkpoint(&self, generation: u64, records: Vec<MergedRecord>) -> bool {
        if records.is_empty() {
            return false;
        }

        let _guard = self.write_lock.lock().await;
        let current = self.generation();
        if generation != current {
            debug!(generation, current, "Discarding stale checkpoint");
            return false;
        }

        match self.store.save(&records).await {
            Ok(()) => {
                debug!(records = records.len(), generation, "Checkpoint written");
                true
            }
            Err(err) => {
                warn!(error = %err, "Checkpoint failed");
                false
            }
        }
    }

    /// Remove the stored snapshot.
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        match self.store.clear().await {
            Ok(()) => info!("Snapshot cleared"),
            Err(err) => warn!(error = %err, "Failed to clear snapshot"),
        }
    }
}

/// Keep only records whose event starts strictly after `now`.
#[must_use]
pub fn retain_upcoming(records: Vec<MergedRecord>, now: DateTime<Utc>) -> Vec<MergedRecord> {
    records
        .into_iter()
        .filter(|record| record.event().is_upcoming(now))
        .collect()
}
