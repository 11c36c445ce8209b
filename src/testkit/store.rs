//! In-memory [`SnapshotStore`] for tests.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::MergedRecord;
use crate::error::{Error, Result};
use crate::port::SnapshotStore;

/// Snapshot store backed by a mutex, with call counters.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Vec<MergedRecord>>>,
    fail_saves: AtomicBool,
    load_calls: AtomicU32,
    save_calls: AtomicU32,
    clear_calls: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(records: Vec<MergedRecord>) -> Self {
        Self {
            snapshot: Mutex::new(Some(records)),
            ..Self::default()
        }
    }

    /// Make every `save` fail with an IO error.
    pub fn failing_saves(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Currently stored snapshot.
    pub fn snapshot(&self) -> Option<Vec<MergedRecord>> {
        self.snapshot.lock().clone()
    }

    pub fn load_calls(&self) -> u32 {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> u32 {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> u32 {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Option<Vec<MergedRecord>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.lock().clone()
    }

    async fn save(&self, records: &[MergedRecord]) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::other("scripted save failure")));
        }
        *self.snapshot.lock() = Some(records.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock() = None;
        Ok(())
    }
}
