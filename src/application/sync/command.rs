//! Messages delivered to the orchestrator task.

use crate::domain::MergedRecord;
use crate::error::FetchError;

/// Requests from the presentation layer and lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    LoadNextPage,
    Retry,
    Suspend,
    Resume,
    Shutdown,
}

/// Identifies one cache load or bulk fetch.
///
/// `generation` is the data generation the work was started against; `seq`
/// distinguishes loads started within the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub generation: u64,
    pub seq: u64,
}

/// Results of background work, handed back into the serialized loop.
#[derive(Debug)]
pub(crate) enum Completion {
    /// Upcoming records from the snapshot, `None` when absent or stale.
    CacheLoaded {
        ticket: FetchTicket,
        records: Option<Vec<MergedRecord>>,
    },
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<MergedRecord>, FetchError>,
    },
}
