//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use oddsync::adapter::outbound::JsonFileStore;
use oddsync::application::{
    BulkFetcher, FeedEvent, PersistenceGateway, RetryPolicy, SyncHandle, SyncOrchestrator,
    SyncSettings,
};
use oddsync::domain::LoadState;
use oddsync::port::{EventSource, SnapshotStore};
use oddsync::testkit::source::ScriptedSource;
use oddsync::testkit::stream::{channel_stream, ChannelOddsStreamHandle};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

pub const WAIT: Duration = Duration::from_secs(5);

/// A running orchestrator wired to test doubles.
pub struct Running {
    pub handle: SyncHandle,
    pub task: JoinHandle<()>,
    pub source: Arc<ScriptedSource>,
    pub stream: ChannelOddsStreamHandle,
}

impl Running {
    /// Suspend (flushing a checkpoint), shut down and wait for the task.
    pub async fn stop(self) {
        self.handle.suspend().unwrap();
        self.handle.shutdown().unwrap();
        timeout(WAIT, self.task)
            .await
            .expect("orchestrator did not stop")
            .unwrap();
    }
}

/// Start an orchestrator over `source` and `store` with a channel stream.
pub fn start(
    source: Arc<ScriptedSource>,
    store: Arc<dyn SnapshotStore>,
    settings: SyncSettings,
) -> Running {
    let (stream, stream_handle) = channel_stream();
    let orchestrator = SyncOrchestrator::new(
        BulkFetcher::new(
            Arc::clone(&source) as Arc<dyn EventSource>,
            RetryPolicy::default(),
        ),
        PersistenceGateway::new(store),
        Box::new(stream),
        settings,
    );
    let (handle, task) = orchestrator.spawn();
    Running {
        handle,
        task,
        source,
        stream: stream_handle,
    }
}

/// Start an orchestrator persisting to a JSON file at `path`.
pub fn start_with_file(
    source: Arc<ScriptedSource>,
    path: &Path,
    settings: SyncSettings,
) -> Running {
    start(source, Arc::new(JsonFileStore::new(path)), settings)
}

pub async fn wait_for(handle: &SyncHandle, predicate: fn(&LoadState) -> bool) -> LoadState {
    timeout(WAIT, handle.wait_for_state(predicate))
        .await
        .expect("timed out waiting for load state")
        .unwrap()
}

pub async fn recv(rx: &mut broadcast::Receiver<FeedEvent>) -> FeedEvent {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for feed event")
        .unwrap()
}

/// Poll `check` until it holds.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    timeout(WAIT, async {
        while !check() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached");
}
