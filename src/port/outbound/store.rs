//! Persistence port for feed snapshots.

use async_trait::async_trait;

use crate::domain::MergedRecord;
use crate::error::Result;

/// Durable storage for one snapshot of merged records.
///
/// Implementations keep exactly one snapshot under a well-known key.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// Returns `None` when nothing is stored or the stored bytes cannot be
    /// decoded. Decode failures are never reported as errors.
    async fn load(&self) -> Option<Vec<MergedRecord>>;

    /// Replace the stored snapshot.
    ///
    /// Must be atomic: a concurrent `load` sees either the old or the new
    /// snapshot, never a partial write.
    async fn save(&self, records: &[MergedRecord]) -> Result<()>;

    /// Remove the stored snapshot. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
