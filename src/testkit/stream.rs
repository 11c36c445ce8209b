//! Mock [`OddsStream`] implementations for testing.
//!
//! - [`ScriptedOddsStream`]: pre-loaded connect results and events.
//!   Best for: reconnection logic, disconnect handling.
//!
//! - [`ChannelOddsStream`]: channel-backed stream with an external control
//!   handle. Best for: orchestrator tests needing on-demand batch delivery.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::{EventId, OddsQuote};
use crate::error::Result;
use crate::port::{OddsStream, StreamEvent};

// ---------------------------------------------------------------------------
// ScriptedOddsStream
// ---------------------------------------------------------------------------

/// A mock stream with scripted connect results and a fixed event queue.
///
/// Each `connect()` pops the next result (defaults to `Ok(())` when
/// exhausted). Once the event queue is drained `next_event` blocks forever,
/// like a quiet connection; a scripted `None` entry ends the stream instead.
pub struct ScriptedOddsStream {
    connect_results: VecDeque<Result<()>>,
    events: VecDeque<Option<StreamEvent>>,
    connect_count: Arc<AtomicU32>,
    disconnect_count: Arc<AtomicU32>,
}

impl ScriptedOddsStream {
    pub fn new() -> Self {
        Self {
            connect_results: VecDeque::new(),
            events: VecDeque::new(),
            connect_count: Arc::new(AtomicU32::new(0)),
            disconnect_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_connect_results(mut self, results: Vec<Result<()>>) -> Self {
        self.connect_results = results.into();
        self
    }

    pub fn with_events(mut self, events: Vec<Option<StreamEvent>>) -> Self {
        self.events = events.into();
        self
    }

    /// Shared counters for asserting connect/disconnect call counts.
    pub fn counts(&self) -> (Arc<AtomicU32>, Arc<AtomicU32>) {
        (self.connect_count.clone(), self.disconnect_count.clone())
    }

    pub fn connect_count(&self) -> u32 {
        self.connect_count.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> u32 {
        self.disconnect_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedOddsStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OddsStream for ScriptedOddsStream {
    async fn connect(&mut self, _ids: &[EventId]) -> Result<()> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        self.connect_results.pop_front().unwrap_or(Ok(()))
    }

    async fn disconnect(&mut self) {
        self.disconnect_count.fetch_add(1, Ordering::SeqCst);
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        match self.events.pop_front() {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }

    fn stream_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// ChannelOddsStream
// ---------------------------------------------------------------------------

/// A mock stream controlled externally via a [`ChannelOddsStreamHandle`].
///
/// Events sent through the handle are delivered only while connected;
/// anything sent while disconnected is dropped, as a real push channel would.
pub struct ChannelOddsStream {
    event_rx: mpsc::UnboundedReceiver<StreamEvent>,
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    connected: AtomicBool,
    connect_count: AtomicU32,
    disconnect_count: AtomicU32,
    subscribed: Mutex<Vec<EventId>>,
}

/// Control handle for a [`ChannelOddsStream`].
#[derive(Clone)]
pub struct ChannelOddsStreamHandle {
    event_tx: mpsc::UnboundedSender<StreamEvent>,
    shared: Arc<Shared>,
}

impl ChannelOddsStreamHandle {
    /// Push a batch of quotes to the stream.
    pub fn send_batch(&self, batch: Vec<OddsQuote>) {
        let _ = self.event_tx.send(StreamEvent::Batch(batch));
    }

    /// Push a transport failure.
    pub fn send_disconnect(&self, reason: impl Into<String>) {
        let _ = self.event_tx.send(StreamEvent::Disconnected {
            reason: reason.into(),
        });
    }

    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    pub fn connect_count(&self) -> u32 {
        self.shared.connect_count.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> u32 {
        self.shared.disconnect_count.load(Ordering::SeqCst)
    }

    /// Ids of the last `connect()` call.
    pub fn subscribed_ids(&self) -> Vec<EventId> {
        self.shared.subscribed.lock().clone()
    }
}

/// Create a [`ChannelOddsStream`] and its control handle.
pub fn channel_stream() -> (ChannelOddsStream, ChannelOddsStreamHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    let shared = Arc::new(Shared::default());
    (
        ChannelOddsStream {
            event_rx: rx,
            shared: Arc::clone(&shared),
        },
        ChannelOddsStreamHandle {
            event_tx: tx,
            shared,
        },
    )
}

#[async_trait]
impl OddsStream for ChannelOddsStream {
    async fn connect(&mut self, ids: &[EventId]) -> Result<()> {
        while self.event_rx.try_recv().is_ok() {}
        self.shared.connect_count.fetch_add(1, Ordering::SeqCst);
        *self.shared.subscribed.lock() = ids.to_vec();
        self.shared.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.shared.disconnect_count.fetch_add(1, Ordering::SeqCst);
        self.shared.connected.store(false, Ordering::SeqCst);
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        loop {
            let event = self.event_rx.recv().await?;
            if self.shared.connected.load(Ordering::SeqCst) {
                return Some(event);
            }
        }
    }

    fn stream_name(&self) -> &'static str {
        "channel"
    }
}
