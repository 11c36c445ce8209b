//! Scripted [`EventSource`] for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{Event, MergedRecord, OddsQuote};
use crate::error::SourceError;
use crate::port::EventSource;

/// A source serving fixed collections, with scripted failures and an
/// optional gate that holds one fetch in flight until released.
///
/// Each call snapshots the data when it starts, so data swapped in while a
/// call is held does not leak into that call's result.
#[derive(Default)]
pub struct ScriptedSource {
    events: Mutex<Vec<Event>>,
    odds: Mutex<Vec<OddsQuote>>,
    event_failures: AtomicU32,
    odds_failures: AtomicU32,
    gate: Mutex<Option<Arc<Notify>>>,
    event_calls: AtomicU32,
    odds_calls: AtomicU32,
    reset_calls: AtomicU32,
}

impl ScriptedSource {
    pub fn new(events: Vec<Event>, odds: Vec<OddsQuote>) -> Self {
        Self {
            events: Mutex::new(events),
            odds: Mutex::new(odds),
            ..Self::default()
        }
    }

    pub fn from_records(records: &[MergedRecord]) -> Self {
        let (events, odds) = super::domain::split(records);
        Self::new(events, odds)
    }

    /// Fail the next `n` event calls.
    pub fn failing_events(self, n: u32) -> Self {
        self.event_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Fail the next `n` odds calls.
    pub fn failing_odds(self, n: u32) -> Self {
        self.odds_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Fail the next `n` odds calls, after construction.
    pub fn fail_odds_next(&self, n: u32) {
        self.odds_failures.store(n, Ordering::SeqCst);
    }

    /// Swap the served collections.
    pub fn set_records(&self, records: &[MergedRecord]) {
        let (events, odds) = super::domain::split(records);
        *self.events.lock() = events;
        *self.odds.lock() = odds;
    }

    /// Hold the next event call until the returned gate is notified.
    pub fn hold_next_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn event_calls(&self) -> u32 {
        self.event_calls.load(Ordering::SeqCst)
    }

    pub fn odds_calls(&self) -> u32 {
        self.odds_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> u32 {
        self.reset_calls.load(Ordering::SeqCst)
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        self.event_calls.fetch_add(1, Ordering::SeqCst);
        let events = self.events.lock().clone();
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if Self::take_failure(&self.event_failures) {
            return Err(SourceError::RequestFailed("scripted events failure".into()));
        }
        Ok(events)
    }

    async fn fetch_odds(&self) -> Result<Vec<OddsQuote>, SourceError> {
        self.odds_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.odds_failures) {
            return Err(SourceError::RequestFailed("scripted odds failure".into()));
        }
        Ok(self.odds.lock().clone())
    }

    async fn reset(&self) -> Result<(), SourceError> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
