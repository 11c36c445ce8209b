//! Cloneable front door to a running [`SyncOrchestrator`](super::SyncOrchestrator).

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use super::command::Command;
use crate::application::feed::{Feed, FeedEvent};
use crate::domain::{EventId, LoadState, MergedRecord};
use crate::error::{Error, Result};

/// Sends lifecycle and paging requests to the orchestrator and reads the
/// shared feed.
///
/// Commands are queued and processed in order; the methods return once the
/// command is queued, not once it has taken effect. Observe the effect via
/// [`watch_state`](Self::watch_state) or [`subscribe`](Self::subscribe).
#[derive(Clone)]
pub struct SyncHandle {
    commands: mpsc::UnboundedSender<Command>,
    feed: Arc<Feed>,
}

impl SyncHandle {
    pub(crate) fn new(commands: mpsc::UnboundedSender<Command>, feed: Arc<Feed>) -> Self {
        Self { commands, feed }
    }

    /// Show the next page, or start loading if nothing is loaded yet.
    pub fn load_next_page(&self) -> Result<()> {
        self.send(Command::LoadNextPage)
    }

    /// Discard all data and refetch from a reset source.
    pub fn retry(&self) -> Result<()> {
        self.send(Command::Retry)
    }

    /// Flush a checkpoint and stop live updates.
    pub fn suspend(&self) -> Result<()> {
        self.send(Command::Suspend)
    }

    /// Restart live updates if data is loaded.
    pub fn resume(&self) -> Result<()> {
        self.send(Command::Resume)
    }

    /// Stop the orchestrator task.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.feed.subscribe()
    }

    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<LoadState> {
        self.feed.watch_state()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.feed.load_state()
    }

    #[must_use]
    pub fn visible_window(&self) -> Vec<EventId> {
        self.feed.visible_window()
    }

    #[must_use]
    pub fn visible_records(&self) -> Vec<MergedRecord> {
        self.feed.visible_records()
    }

    #[must_use]
    pub fn record(&self, id: EventId) -> Option<MergedRecord> {
        self.feed.record(id)
    }

    #[must_use]
    pub fn records(&self) -> Vec<MergedRecord> {
        self.feed.records()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.feed.is_exhausted()
    }

    #[must_use]
    pub fn feed(&self) -> &Arc<Feed> {
        &self.feed
    }

    /// Wait until the load state satisfies `predicate` and return it.
    pub async fn wait_for_state<F>(&self, mut predicate: F) -> Result<LoadState>
    where
        F: FnMut(&LoadState) -> bool,
    {
        let mut rx = self.feed.watch_state();
        let state = rx
            .wait_for(|state| predicate(state))
            .await
            .map_err(|_| Error::Closed)?;
        Ok((*state).clone())
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::Closed)
    }
}
