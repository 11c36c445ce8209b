//! Push channel port for incremental odds updates.

use async_trait::async_trait;

use crate::domain::{EventId, OddsQuote};
use crate::error::Result;

/// Events received from an odds stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A batch of replacement quotes for 1..N subscribed events.
    Batch(Vec<OddsQuote>),
    /// Connection lost (may reconnect).
    Disconnected {
        /// The disconnection reason.
        reason: String,
    },
}

/// Real-time odds updates for a subscribed set of events.
///
/// Implementations own their transport and deliver batches for the same
/// event in send order. Only one subscription is active at a time.
#[async_trait]
pub trait OddsStream: Send {
    /// Subscribe to exactly `event_ids`, replacing any previous subscription.
    ///
    /// Batches produced for the previous subscription must not be delivered
    /// after this returns.
    async fn connect(&mut self, event_ids: &[EventId]) -> Result<()>;

    /// Stop delivery and release resources. Idempotent.
    async fn disconnect(&mut self);

    /// Receive the next event.
    ///
    /// Must be cancel-safe: the caller polls it inside `tokio::select!`.
    /// Returns `None` when the stream has ended.
    async fn next_event(&mut self) -> Option<StreamEvent>;

    /// Stream name for logging.
    fn stream_name(&self) -> &'static str;
}

/// Forward to boxed trait objects so generic wrappers accept them.
#[async_trait]
impl OddsStream for Box<dyn OddsStream> {
    async fn connect(&mut self, event_ids: &[EventId]) -> Result<()> {
        (**self).connect(event_ids).await
    }

    async fn disconnect(&mut self) {
        (**self).disconnect().await;
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        (**self).next_event().await
    }

    fn stream_name(&self) -> &'static str {
        (**self).stream_name()
    }
}
