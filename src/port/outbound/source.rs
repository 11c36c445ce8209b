//! Bulk source port for events and odds.

use async_trait::async_trait;

use crate::domain::{Event, OddsQuote};
use crate::error::SourceError;

/// Remote source serving the full event and odds collections.
///
/// Each call returns the whole collection; there is no paging at this layer.
/// Calls are single attempts. Retrying is the caller's concern.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch every known event.
    async fn fetch_events(&self) -> Result<Vec<Event>, SourceError>;

    /// Fetch the current odds for every event that has them.
    async fn fetch_odds(&self) -> Result<Vec<OddsQuote>, SourceError>;

    /// Invalidate any server-side demo state before a hard reset.
    async fn reset(&self) -> Result<(), SourceError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
