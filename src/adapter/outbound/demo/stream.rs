//! Simulated odds push channel.
//!
//! While connected, a producer task emits a batch of random quotes for a
//! random subset of the subscribed events on every tick.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::source::random_odds;
use crate::domain::{EventId, OddsQuote};
use crate::error::Result;
use crate::port::{OddsStream, StreamEvent};

/// Default period between batches.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
/// Default upper bound on quotes per batch.
pub const DEFAULT_MAX_BATCH: usize = 10;

const CHANNEL_CAPACITY: usize = 64;

/// [`OddsStream`] producing random quotes on a timer.
pub struct DemoOddsStream {
    tick: Duration,
    max_batch: usize,
    rx: Option<mpsc::Receiver<Vec<OddsQuote>>>,
    producer: Option<JoinHandle<()>>,
}

impl DemoOddsStream {
    #[must_use]
    pub fn new(tick: Duration, max_batch: usize) -> Self {
        Self {
            tick,
            max_batch: max_batch.max(1),
            rx: None,
            producer: None,
        }
    }

    fn stop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
        self.rx = None;
    }
}

impl Default for DemoOddsStream {
    fn default() -> Self {
        Self::new(DEFAULT_TICK, DEFAULT_MAX_BATCH)
    }
}

impl Drop for DemoOddsStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Quotes for 1..=min(max_batch, ids.len()) distinct random ids.
fn random_batch(ids: &[EventId], max_batch: usize) -> Vec<OddsQuote> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(1..=max_batch.min(ids.len()));
    ids.choose_multiple(&mut rng, count)
        .map(|id| OddsQuote::new(*id, random_odds(&mut rng), random_odds(&mut rng)))
        .collect()
}

#[async_trait]
impl OddsStream for DemoOddsStream {
    async fn connect(&mut self, ids: &[EventId]) -> Result<()> {
        self.stop();
        if ids.is_empty() {
            debug!("Nothing to subscribe to");
            return Ok(());
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let ids = ids.to_vec();
        let tick = self.tick;
        let max_batch = self.max_batch;
        debug!(events = ids.len(), tick_ms = tick.as_millis(), "Demo stream connected");

        self.producer = Some(tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + tick, tick);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                let batch = random_batch(&ids, max_batch);
                trace!(quotes = batch.len(), "Demo batch");
                if tx.send(batch).await.is_err() {
                    break;
                }
            }
        }));
        self.rx = Some(rx);
        Ok(())
    }

    async fn disconnect(&mut self) {
        if self.producer.is_some() {
            debug!("Demo stream disconnected");
        }
        self.stop();
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await.map(StreamEvent::Batch),
            None => std::future::pending().await,
        }
    }

    fn stream_name(&self) -> &'static str {
        "demo"
    }
}
