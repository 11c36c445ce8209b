//! The sync orchestrator task.
//!
//! One task owns every piece of mutable feed state and processes, one at a
//! time: commands from [`SyncHandle`], completions of background cache loads
//! and fetches, odds stream events, and checkpoint ticks. Background work
//! carries a [`FetchTicket`]; a completion is applied only if its ticket is
//! still the pending one and the data generation has not moved on.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

use super::command::{Command, Completion, FetchTicket};
use super::handle::SyncHandle;
use crate::application::feed::Feed;
use crate::application::fetch::BulkFetcher;
use crate::application::pagination::DEFAULT_PAGE_SIZE;
use crate::application::persistence::{retain_upcoming, PersistenceGateway};
use crate::domain::{EventId, LoadState, MergedRecord};
use crate::error::FetchError;
use crate::port::{OddsStream, StreamEvent};

/// Tuning knobs for the orchestrator.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Records per page.
    pub page_size: usize,
    /// Period between checkpoints while loaded.
    pub checkpoint_interval: Duration,
    /// Capacity of the feed notification channel.
    pub event_capacity: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            checkpoint_interval: Duration::from_secs(10),
            event_capacity: 1024,
        }
    }
}

/// How a bulk fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    /// Nothing usable was cached; the feed waits for this fetch.
    Initial,
    /// Cached data is already shown; refresh it quietly.
    Refresh,
    /// Hard reset: reset the source and clear the snapshot first.
    Reset,
}

struct PendingLoad {
    ticket: FetchTicket,
    task: JoinHandle<()>,
}

/// Owner of the feed's mutable state. Create with [`SyncOrchestrator::new`]
/// and start with [`SyncOrchestrator::spawn`].
pub struct SyncOrchestrator {
    feed: Arc<Feed>,
    fetcher: Arc<BulkFetcher>,
    persistence: Arc<PersistenceGateway>,
    stream: Box<dyn OddsStream>,
    checkpoint_interval: Duration,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    generation: u64,
    next_seq: u64,
    pending: Option<PendingLoad>,
    checkpoint_timer: Option<Interval>,
    checkpoint_task: Option<JoinHandle<()>>,
    subscribed: bool,
}

impl SyncOrchestrator {
    #[must_use]
    pub fn new(
        fetcher: BulkFetcher,
        persistence: PersistenceGateway,
        stream: Box<dyn OddsStream>,
        settings: SyncSettings,
    ) -> Self {
        let (completion_tx, completions) = mpsc::unbounded_channel();
        Self {
            feed: Arc::new(Feed::new(settings.page_size, settings.event_capacity)),
            fetcher: Arc::new(fetcher),
            persistence: Arc::new(persistence),
            stream,
            checkpoint_interval: settings.checkpoint_interval,
            completions,
            completion_tx,
            generation: 0,
            next_seq: 0,
            pending: None,
            checkpoint_timer: None,
            checkpoint_task: None,
            subscribed: false,
        }
    }

    /// Start the orchestrator task.
    ///
    /// The task ends after [`SyncHandle::shutdown`] or once every handle is
    /// dropped.
    pub fn spawn(self) -> (SyncHandle, JoinHandle<()>) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let handle = SyncHandle::new(command_tx, Arc::clone(&self.feed));
        let task = tokio::spawn(self.run(commands));
        (handle, task)
    }

    /// Shared read model, available before the task is spawned.
    #[must_use]
    pub fn feed(&self) -> Arc<Feed> {
        Arc::clone(&self.feed)
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!(stream = self.stream.stream_name(), "Sync orchestrator started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command).await,
                },
                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion).await;
                }
                event = self.stream.next_event(), if self.subscribed => {
                    self.handle_stream_event(event).await;
                }
                () = next_tick(&mut self.checkpoint_timer), if self.checkpoint_timer.is_some() => {
                    self.checkpoint();
                }
            }
        }
        self.teardown().await;
        info!("Sync orchestrator stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::LoadNextPage => self.load_next_page(),
            Command::Retry => self.retry().await,
            Command::Suspend => self.suspend().await,
            Command::Resume => self.resume().await,
            Command::Shutdown => {}
        }
    }

    fn load_next_page(&mut self) {
        if self.feed.load_state().is_loading() {
            debug!("Page request ignored while loading");
            return;
        }
        if self.feed.is_empty() {
            if self.pending.is_none() {
                self.cold_start();
            }
            return;
        }
        match self.feed.append_page() {
            Some(appended) => debug!(appended, "Page appended"),
            None => debug!("No more pages"),
        }
    }

    /// Try the cached snapshot first, then fall back to a bulk fetch.
    fn cold_start(&mut self) {
        info!("Cold start");
        self.set_state(LoadState::Loading);

        let ticket = self.next_ticket();
        let persistence = Arc::clone(&self.persistence);
        let tx = self.completion_tx.clone();
        let task = tokio::spawn(async move {
            let records = match persistence.load().await {
                Some(records) => {
                    let cached = records.len();
                    let upcoming = retain_upcoming(records, Utc::now());
                    if upcoming.is_empty() {
                        info!(cached, "Cached snapshot is stale, clearing");
                        persistence.clear().await;
                        None
                    } else {
                        debug!(cached, upcoming = upcoming.len(), "Cached snapshot usable");
                        Some(upcoming)
                    }
                }
                None => None,
            };
            let _ = tx.send(Completion::CacheLoaded { ticket, records });
        });
        self.set_pending(ticket, task);
    }

    fn start_fetch(&mut self, mode: FetchMode) {
        let ticket = self.next_ticket();
        let fetcher = Arc::clone(&self.fetcher);
        let persistence = Arc::clone(&self.persistence);
        let tx = self.completion_tx.clone();
        debug!(?mode, generation = ticket.generation, "Starting bulk fetch");

        let task = tokio::spawn(async move {
            if mode == FetchMode::Reset {
                fetcher.reset_source().await;
                persistence.clear().await;
            }
            let result = fetcher.fetch().await;
            let _ = tx.send(Completion::Fetched { ticket, result });
        });
        self.set_pending(ticket, task);
    }

    async fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::CacheLoaded { ticket, records } => {
                if !self.accepts(ticket) {
                    debug!(?ticket, "Discarding superseded cache load");
                    return;
                }
                self.pending = None;
                match records {
                    Some(records) => {
                        info!(records = records.len(), "Warm start from cached snapshot");
                        self.apply(records).await;
                        self.start_fetch(FetchMode::Refresh);
                    }
                    None => {
                        info!("No usable cached snapshot, fetching");
                        self.start_fetch(FetchMode::Initial);
                    }
                }
            }
            Completion::Fetched { ticket, result } => {
                if !self.accepts(ticket) {
                    debug!(?ticket, "Discarding superseded fetch result");
                    return;
                }
                self.pending = None;
                match result {
                    Ok(records) => self.apply(records).await,
                    Err(err) => self.fail(&err),
                }
            }
        }
    }

    /// Replace the data set: new generation, fresh pagination, resubscribe.
    async fn apply(&mut self, records: Vec<MergedRecord>) {
        self.generation += 1;
        self.persistence.set_generation(self.generation);

        let ids = self.feed.replace(records);
        info!(
            records = ids.len(),
            generation = self.generation,
            "Feed replaced"
        );
        self.subscribe(&ids).await;
        self.arm_checkpoint_timer();
        self.set_state(LoadState::Loaded);
    }

    fn fail(&mut self, err: &FetchError) {
        error!(error = %err, "Bulk fetch failed");
        self.set_state(LoadState::Failed {
            message: err.to_string(),
        });
    }

    /// Drop everything and refetch from a reset source, bypassing the cache.
    async fn retry(&mut self) {
        info!("Resetting feed");
        self.cancel_pending();
        self.cancel_checkpoints();

        self.generation += 1;
        self.persistence.set_generation(self.generation);

        self.unsubscribe().await;
        self.feed.clear();
        self.set_state(LoadState::Loading);
        self.start_fetch(FetchMode::Reset);
    }

    async fn suspend(&mut self) {
        info!("Suspending feed");
        if self.cancel_pending() && self.feed.is_empty() {
            self.set_state(LoadState::Idle);
        }
        self.cancel_checkpoints();
        self.checkpoint();
        self.unsubscribe().await;
    }

    async fn resume(&mut self) {
        if self.feed.is_empty() {
            debug!("Nothing loaded, resume is a no-op");
            return;
        }
        info!("Resuming feed");
        let ids = self.feed.ids();
        self.subscribe(&ids).await;
        self.arm_checkpoint_timer();
    }

    async fn handle_stream_event(&mut self, event: Option<StreamEvent>) {
        match event {
            Some(StreamEvent::Batch(batch)) => {
                let received = batch.len();
                let changed = self.feed.apply_batch(batch);
                trace!(received, changed = changed.len(), "Odds batch merged");
            }
            Some(StreamEvent::Disconnected { reason }) => {
                warn!(reason = %reason, "Odds stream disconnected, dropping subscription");
                self.unsubscribe().await;
            }
            None => {
                warn!("Odds stream ended, dropping subscription");
                self.unsubscribe().await;
            }
        }
    }

    async fn subscribe(&mut self, ids: &[EventId]) {
        match self.stream.connect(ids).await {
            Ok(()) => {
                self.subscribed = true;
                info!(
                    stream = self.stream.stream_name(),
                    events = ids.len(),
                    "Subscribed to odds stream"
                );
            }
            Err(err) => {
                self.subscribed = false;
                warn!(error = %err, "Odds stream connect failed");
            }
        }
    }

    async fn unsubscribe(&mut self) {
        self.stream.disconnect().await;
        self.subscribed = false;
    }

    fn arm_checkpoint_timer(&mut self) {
        let period = self.checkpoint_interval;
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.checkpoint_timer = Some(timer);
    }

    /// Persist the current records in the background.
    fn checkpoint(&mut self) {
        if self.feed.is_empty() {
            return;
        }
        if self
            .checkpoint_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            debug!("Previous checkpoint still running, skipping");
            return;
        }

        let records = self.feed.records();
        let generation = self.generation;
        let persistence = Arc::clone(&self.persistence);
        self.checkpoint_task = Some(tokio::spawn(async move {
            persistence.checkpoint(generation, records).await;
        }));
    }

    fn cancel_checkpoints(&mut self) {
        self.checkpoint_timer = None;
        if let Some(task) = self.checkpoint_task.take() {
            task.abort();
        }
    }

    /// Abort the in-flight load, if any. Returns whether one was cancelled.
    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                debug!(ticket = ?pending.ticket, "Cancelled in-flight load");
                true
            }
            None => false,
        }
    }

    fn set_pending(&mut self, ticket: FetchTicket, task: JoinHandle<()>) {
        if let Some(previous) = self.pending.replace(PendingLoad { ticket, task }) {
            previous.task.abort();
        }
    }

    fn accepts(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
            && self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.ticket == ticket)
    }

    fn next_ticket(&mut self) -> FetchTicket {
        self.next_seq += 1;
        FetchTicket {
            generation: self.generation,
            seq: self.next_seq,
        }
    }

    fn set_state(&self, state: LoadState) {
        let previous = self.feed.load_state();
        if previous != state {
            debug!(from = %previous, to = %state, "Load state changed");
        }
        self.feed.set_state(state);
    }

    async fn teardown(&mut self) {
        self.cancel_pending();
        self.checkpoint_timer = None;
        if let Some(task) = self.checkpoint_task.take() {
            let _ = task.await;
        }
        self.unsubscribe().await;
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fetch::RetryPolicy;
    use crate::application::FeedEvent;
    use crate::port::{EventSource, SnapshotStore};
    use crate::testkit::config;
    use crate::testkit::domain::{ids, quote, record_at, records};
    use crate::testkit::source::ScriptedSource;
    use crate::testkit::store::MemoryStore;
    use crate::testkit::stream::{channel_stream, ChannelOddsStreamHandle};
    use rust_decimal_macros::dec;
    use tokio::sync::broadcast;
    use tokio::time::{sleep, timeout};

    const WAIT: Duration = Duration::from_secs(5);

    struct Harness {
        handle: SyncHandle,
        task: JoinHandle<()>,
        source: Arc<ScriptedSource>,
        store: Arc<MemoryStore>,
        stream: ChannelOddsStreamHandle,
    }

    fn start(source: ScriptedSource, store: MemoryStore, settings: SyncSettings) -> Harness {
        let source = Arc::new(source);
        let store = Arc::new(store);
        let (stream, stream_handle) = channel_stream();
        let orchestrator = SyncOrchestrator::new(
            BulkFetcher::new(
                Arc::clone(&source) as Arc<dyn EventSource>,
                RetryPolicy::default(),
            ),
            PersistenceGateway::new(Arc::clone(&store) as Arc<dyn SnapshotStore>),
            Box::new(stream),
            settings,
        );
        let (handle, task) = orchestrator.spawn();
        Harness {
            handle,
            task,
            source,
            store,
            stream: stream_handle,
        }
    }

    async fn wait_loaded(handle: &SyncHandle) {
        timeout(WAIT, handle.wait_for_state(LoadState::is_loaded))
            .await
            .expect("timed out waiting for loaded")
            .unwrap();
    }

    async fn eventually(mut check: impl FnMut() -> bool) {
        timeout(WAIT, async {
            while !check() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached");
    }

    async fn recv(rx: &mut broadcast::Receiver<FeedEvent>) -> FeedEvent {
        timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for feed event")
            .unwrap()
    }

    #[tokio::test]
    async fn test_pages_through_hundred_records() {
        let data = records(100, 1);
        let h = start(
            ScriptedSource::from_records(&data),
            MemoryStore::new(),
            config::sync(40),
        );
        let mut rx = h.handle.subscribe();

        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;
        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::WindowReplaced {
                ids: ids(&data[..40])
            }
        );

        h.handle.load_next_page().unwrap();
        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::PageAppended {
                ids: ids(&data[40..80])
            }
        );
        h.handle.load_next_page().unwrap();
        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::PageAppended {
                ids: ids(&data[80..])
            }
        );

        h.handle.load_next_page().unwrap();
        sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(h.handle.visible_window(), ids(&data));
        assert!(h.handle.is_exhausted());
    }

    #[tokio::test]
    async fn test_stream_batch_changes_odds_in_place() {
        let data = records(10, 1);
        let h = start(
            ScriptedSource::from_records(&data),
            MemoryStore::new(),
            config::sync(40),
        );
        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;
        assert_eq!(h.stream.subscribed_ids(), ids(&data));

        let mut rx = h.handle.subscribe();
        let window = h.handle.visible_window();
        h.stream.send_batch(vec![
            quote(5, dec!(3.21), dec!(1.89)),
            quote(999, dec!(2.00), dec!(2.00)),
        ]);

        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::OddsChanged {
                ids: vec![EventId::new(5)]
            }
        );
        assert_eq!(h.handle.visible_window(), window);
        let record = h.handle.record(EventId::new(5)).unwrap();
        assert_eq!(record.odds().odds_a(), dec!(3.21));
        assert!(h.handle.record(EventId::new(999)).is_none());
    }

    #[tokio::test]
    async fn test_warm_start_then_background_refresh_replaces_window() {
        let cached = records(2, 1);
        let fresh = records(5, 1);
        let source = ScriptedSource::from_records(&fresh);
        let gate = source.hold_next_fetch();
        let h = start(
            source,
            MemoryStore::with_snapshot(cached.clone()),
            config::sync(40),
        );
        let mut rx = h.handle.subscribe();

        h.handle.load_next_page().unwrap();
        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::WindowReplaced { ids: ids(&cached) }
        );
        wait_loaded(&h.handle).await;
        assert_eq!(h.stream.subscribed_ids(), ids(&cached));

        gate.notify_one();
        assert_eq!(
            recv(&mut rx).await,
            FeedEvent::WindowReplaced { ids: ids(&fresh) }
        );
        assert_eq!(h.handle.records().len(), 5);
        eventually(|| h.stream.subscribed_ids() == ids(&fresh)).await;
        assert_eq!(h.stream.connect_count(), 2);
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_cleared_and_fetched() {
        let fresh = records(3, 1);
        let h = start(
            ScriptedSource::from_records(&fresh),
            MemoryStore::with_snapshot(vec![record_at(1, -120), record_at(2, -60)]),
            config::sync(40),
        );

        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;

        assert_eq!(h.store.clear_calls(), 1);
        assert_eq!(h.handle.visible_window(), ids(&fresh));
    }

    #[tokio::test]
    async fn test_retry_discards_superseded_fetch() {
        let old = records(3, 1);
        let new = records(3, 10);
        let source = ScriptedSource::from_records(&old);
        let gate = source.hold_next_fetch();
        let h = start(source, MemoryStore::new(), config::sync(40));

        h.handle.load_next_page().unwrap();
        eventually(|| h.source.event_calls() == 1).await;

        h.source.set_records(&new);
        h.handle.retry().unwrap();
        wait_loaded(&h.handle).await;
        assert_eq!(h.handle.visible_window(), ids(&new));

        gate.notify_one();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(h.handle.visible_window(), ids(&new));
        assert_eq!(h.source.reset_calls(), 1);
        assert_eq!(h.store.clear_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_then_retry_recovers() {
        let data = records(4, 1);
        let h = start(
            ScriptedSource::from_records(&data).failing_odds(5),
            MemoryStore::new(),
            config::sync(40),
        );

        h.handle.load_next_page().unwrap();
        let state = timeout(WAIT, h.handle.wait_for_state(LoadState::is_failed))
            .await
            .unwrap()
            .unwrap();
        match state {
            LoadState::Failed { message } => assert!(message.contains("odds"), "{message}"),
            other => panic!("unexpected state {other}"),
        }
        assert_eq!(h.source.odds_calls(), 5);
        assert!(h.handle.visible_window().is_empty());

        h.handle.retry().unwrap();
        wait_loaded(&h.handle).await;
        assert_eq!(h.handle.visible_window(), ids(&data));
    }

    #[tokio::test]
    async fn test_page_request_ignored_while_loading() {
        let source = ScriptedSource::from_records(&records(3, 1));
        let gate = source.hold_next_fetch();
        let h = start(source, MemoryStore::new(), config::sync(40));

        h.handle.load_next_page().unwrap();
        eventually(|| h.source.event_calls() == 1).await;
        h.handle.load_next_page().unwrap();
        h.handle.load_next_page().unwrap();

        gate.notify_one();
        wait_loaded(&h.handle).await;
        assert_eq!(h.source.event_calls(), 1);
        assert_eq!(h.store.load_calls(), 1);
    }

    #[tokio::test]
    async fn test_suspend_flushes_and_disconnects_then_resume_reconnects() {
        let data = records(6, 1);
        let h = start(
            ScriptedSource::from_records(&data),
            MemoryStore::new(),
            config::sync(40),
        );
        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;

        h.handle.suspend().unwrap();
        eventually(|| h.store.snapshot().is_some()).await;
        assert_eq!(ids(&h.store.snapshot().unwrap()), ids(&data));
        eventually(|| !h.stream.is_connected()).await;

        h.handle.resume().unwrap();
        eventually(|| h.stream.is_connected()).await;
        assert_eq!(h.stream.connect_count(), 2);
        assert_eq!(h.stream.subscribed_ids(), ids(&data));
        assert!(h.handle.load_state().is_loaded());
    }

    #[tokio::test]
    async fn test_suspend_during_cold_start_returns_to_idle() {
        let source = ScriptedSource::from_records(&records(3, 1));
        let gate = source.hold_next_fetch();
        let h = start(source, MemoryStore::new(), config::sync(40));

        h.handle.load_next_page().unwrap();
        eventually(|| h.source.event_calls() == 1).await;
        h.handle.suspend().unwrap();
        timeout(WAIT, h.handle.wait_for_state(|state| *state == LoadState::Idle))
            .await
            .unwrap()
            .unwrap();
        drop(gate);

        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;
        assert_eq!(h.handle.records().len(), 3);
    }

    #[tokio::test]
    async fn test_resume_without_data_is_noop() {
        let h = start(
            ScriptedSource::from_records(&records(3, 1)),
            MemoryStore::new(),
            config::sync(40),
        );

        h.handle.resume().unwrap();
        sleep(Duration::from_millis(20)).await;

        assert_eq!(h.stream.connect_count(), 0);
        assert_eq!(h.handle.load_state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_checkpoint_timer_persists_snapshot() {
        let data = records(5, 1);
        let settings = SyncSettings {
            checkpoint_interval: Duration::from_millis(20),
            ..config::sync(40)
        };
        let h = start(
            ScriptedSource::from_records(&data),
            MemoryStore::new(),
            settings,
        );

        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;

        eventually(|| h.store.save_calls() >= 2).await;
        assert_eq!(ids(&h.store.snapshot().unwrap()), ids(&data));
    }

    #[tokio::test]
    async fn test_stream_disconnect_drops_subscription() {
        let h = start(
            ScriptedSource::from_records(&records(3, 1)),
            MemoryStore::new(),
            config::sync(40),
        );
        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;

        h.stream.send_disconnect("socket closed");
        eventually(|| h.stream.disconnect_count() == 1).await;
        assert!(h.handle.load_state().is_loaded());

        h.handle.resume().unwrap();
        eventually(|| h.stream.connect_count() == 2).await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_task_and_closes_handle() {
        let h = start(
            ScriptedSource::from_records(&records(3, 1)),
            MemoryStore::new(),
            config::sync(40),
        );
        h.handle.load_next_page().unwrap();
        wait_loaded(&h.handle).await;

        h.handle.shutdown().unwrap();
        timeout(WAIT, h.task).await.unwrap().unwrap();

        assert!(!h.stream.is_connected());
        assert!(h.handle.load_next_page().is_err());
    }
}
