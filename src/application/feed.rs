//! Shared read model of the feed with change notifications.
//!
//! The orchestrator task is the only writer. Every mutation takes the write
//! lock, changes the store, the pagination cursor and the visible window
//! together, and emits its notification before releasing the lock, so
//! readers on other tasks only ever see a state before or after a whole
//! mutation.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use tokio::sync::{broadcast, watch};

use super::pagination::Paginator;
use super::reconcile::merge_incremental;
use super::store::RecordStore;
use crate::domain::{EventId, LoadState, MergedRecord, OddsQuote};

/// Notification sent to presentation-layer subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The data set was replaced; the window now holds exactly `ids`.
    WindowReplaced { ids: Vec<EventId> },
    /// `ids` were appended to the end of the window.
    PageAppended { ids: Vec<EventId> },
    /// The odds of `ids` changed in place. The window is unchanged.
    OddsChanged { ids: Vec<EventId> },
}

struct FeedView {
    store: RecordStore,
    paginator: Paginator,
    window: Vec<EventId>,
}

/// Record store, pagination cursor and visible window behind one lock.
pub struct Feed {
    view: RwLock<FeedView>,
    events: broadcast::Sender<FeedEvent>,
    state: watch::Sender<LoadState>,
}

impl Feed {
    /// Create an empty feed.
    ///
    /// `capacity` bounds the notification channel; slow subscribers observe
    /// `Lagged` and should re-read the window.
    #[must_use]
    pub fn new(page_size: usize, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            view: RwLock::new(FeedView {
                store: RecordStore::new(),
                paginator: Paginator::new(page_size),
                window: Vec::new(),
            }),
            events,
            state,
        }
    }

    /// Subscribe to window and odds notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.events.subscribe()
    }

    /// Watch load state transitions.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn record(&self, id: EventId) -> Option<MergedRecord> {
        self.view.read().store.get(id).cloned()
    }

    /// Ids paged in so far, in display order.
    #[must_use]
    pub fn visible_window(&self) -> Vec<EventId> {
        self.view.read().window.clone()
    }

    /// Records of the visible window, in window order.
    #[must_use]
    pub fn visible_records(&self) -> Vec<MergedRecord> {
        let view = self.view.read();
        view.window
            .iter()
            .filter_map(|id| view.store.get(*id).cloned())
            .collect()
    }

    /// Every stored record in display order.
    #[must_use]
    pub fn records(&self) -> Vec<MergedRecord> {
        self.view.read().store.ordered_records()
    }

    /// Every stored id in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<EventId> {
        self.view.read().store.ordered_ids().to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.view.read().store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.view.read().paginator.is_exhausted()
    }

    pub(crate) fn set_state(&self, state: LoadState) {
        self.state.send_replace(state);
    }

    /// Replace the data set and start a fresh pagination cycle.
    ///
    /// The window becomes the first page. Returns every stored id.
    pub(crate) fn replace(&self, records: Vec<MergedRecord>) -> Vec<EventId> {
        let mut view = self.view.write();
        let FeedView {
            store,
            paginator,
            window,
        } = &mut *view;

        store.replace_all(records);
        paginator.reset();
        *window = paginator.next_page(store.ordered_ids()).unwrap_or_default();

        let _ = self.events.send(FeedEvent::WindowReplaced {
            ids: window.clone(),
        });
        store.ordered_ids().to_vec()
    }

    /// Drop every record and empty the window.
    pub(crate) fn clear(&self) {
        let mut view = self.view.write();
        view.store.clear();
        view.paginator.reset();
        view.window.clear();
        let _ = self.events.send(FeedEvent::WindowReplaced { ids: Vec::new() });
    }

    /// Append the next page to the window.
    ///
    /// Returns the number of appended ids, `None` when everything is shown.
    pub(crate) fn append_page(&self) -> Option<usize> {
        let mut view = self.view.write();
        let FeedView {
            store,
            paginator,
            window,
        } = &mut *view;

        let page = paginator.next_page(store.ordered_ids())?;
        window.extend_from_slice(&page);
        let appended = page.len();
        let _ = self.events.send(FeedEvent::PageAppended { ids: page });
        Some(appended)
    }

    /// Merge a batch of quotes and notify about the changed ids.
    pub(crate) fn apply_batch(&self, batch: Vec<OddsQuote>) -> BTreeSet<EventId> {
        let mut view = self.view.write();
        let changed = merge_incremental(&mut view.store, batch);
        if !changed.is_empty() {
            let _ = self.events.send(FeedEvent::OddsChanged {
                ids: changed.iter().copied().collect(),
            });
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{ids, quote, records};
    use rust_decimal_macros::dec;

    #[test]
    fn test_replace_shows_first_page() {
        let feed = Feed::new(40, 16);
        let mut rx = feed.subscribe();
        let data = records(100, 1);

        let all = feed.replace(data.clone());

        assert_eq!(all, ids(&data));
        assert_eq!(feed.visible_window(), ids(&data[..40]));
        assert_eq!(
            rx.try_recv().unwrap(),
            FeedEvent::WindowReplaced {
                ids: ids(&data[..40])
            }
        );
    }

    #[test]
    fn test_append_pages_until_exhausted() {
        let feed = Feed::new(40, 16);
        feed.replace(records(100, 1));

        assert_eq!(feed.append_page(), Some(40));
        assert_eq!(feed.append_page(), Some(20));
        assert_eq!(feed.append_page(), None);
        assert_eq!(feed.visible_window().len(), 100);
        assert!(feed.is_exhausted());
    }

    #[test]
    fn test_batch_changes_odds_but_not_window() {
        let feed = Feed::new(40, 16);
        feed.replace(records(10, 1));
        let mut rx = feed.subscribe();
        let window = feed.visible_window();

        let changed = feed.apply_batch(vec![quote(5, dec!(3.21), dec!(1.89))]);

        assert_eq!(changed.into_iter().collect::<Vec<_>>(), vec![EventId::new(5)]);
        assert_eq!(feed.visible_window(), window);
        assert_eq!(feed.record(EventId::new(5)).unwrap().odds().odds_a(), dec!(3.21));
        assert_eq!(
            rx.try_recv().unwrap(),
            FeedEvent::OddsChanged {
                ids: vec![EventId::new(5)]
            }
        );
    }

    #[test]
    fn test_unknown_batch_is_silent() {
        let feed = Feed::new(40, 16);
        feed.replace(records(3, 1));
        let mut rx = feed.subscribe();

        assert!(feed.apply_batch(vec![quote(42, dec!(2), dec!(2))]).is_empty());
        assert!(rx.try_recv().is_err());
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn test_clear_empties_window_and_store() {
        let feed = Feed::new(2, 16);
        feed.replace(records(5, 1));
        feed.append_page();

        feed.clear();

        assert!(feed.is_empty());
        assert!(feed.visible_window().is_empty());
        assert!(!feed.is_exhausted());
    }

    #[test]
    fn test_visible_records_follow_window() {
        let feed = Feed::new(2, 16);
        let data = records(5, 1);
        feed.replace(data.clone());

        assert_eq!(ids(&feed.visible_records()), ids(&data[..2]));
    }
}
