//! Reconciliation of bulk and incremental data into merged records.

use std::collections::{BTreeSet, HashMap};

use tracing::trace;

use super::store::RecordStore;
use crate::domain::{Event, EventId, MergedRecord, OddsQuote};

/// Join events with their odds and sort for display.
///
/// Events without a quote are dropped. When the odds collection carries
/// several quotes for one event, the later one wins. The result is ordered by
/// start time, ties by id.
#[must_use]
pub fn merge_bulk(events: Vec<Event>, odds: Vec<OddsQuote>) -> Vec<MergedRecord> {
    let mut odds_by_id: HashMap<EventId, OddsQuote> = HashMap::with_capacity(odds.len());
    for quote in odds {
        odds_by_id.insert(quote.event_id(), quote);
    }

    let total = events.len();
    let mut merged: Vec<MergedRecord> = events
        .into_iter()
        .filter_map(|event| {
            let quote = odds_by_id.remove(&event.id())?;
            MergedRecord::try_new(event, quote).ok()
        })
        .collect();
    merged.sort_by_key(MergedRecord::sort_key);

    if merged.len() < total {
        trace!(
            dropped = total - merged.len(),
            "Dropped events without odds"
        );
    }
    merged
}

/// Apply a batch of replacement quotes to the store.
///
/// Only events already in the store are touched; unknown ids are ignored and
/// never inserted. Returns the ids whose quote was replaced.
pub fn merge_incremental(store: &mut RecordStore, batch: Vec<OddsQuote>) -> BTreeSet<EventId> {
    let mut changed = BTreeSet::new();
    for quote in batch {
        let id = quote.event_id();
        if store.replace_odds(quote) {
            changed.insert(id);
        }
    }
    changed
}
