//! Authoritative in-memory record store.
//!
//! Holds two views of the same records: a map for O(1) lookup and odds
//! replacement, and an id sequence sorted by start time (ties by id) that
//! feeds pagination. Every mutation keeps both views consistent.

use std::collections::HashMap;

use crate::domain::{EventId, MergedRecord, OddsQuote};

/// Merged records keyed by event id, plus their display order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<EventId, MergedRecord>,
    ordered: Vec<EventId>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in any order.
    ///
    /// Duplicate ids keep the later record.
    #[must_use]
    pub fn from_records(records: Vec<MergedRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Replace every record. Used on full reloads only.
    pub fn replace_all(&mut self, records: Vec<MergedRecord>) {
        self.records.clear();
        for record in records {
            self.records.insert(record.id(), record);
        }

        let mut ordered: Vec<&MergedRecord> = self.records.values().collect();
        ordered.sort_by_key(|record| record.sort_key());
        self.ordered = ordered.into_iter().map(MergedRecord::id).collect();
    }

    /// Replace the quote of a stored record in place.
    ///
    /// Returns `false` (and stores nothing) when the event is unknown. The
    /// display order never changes here.
    pub fn replace_odds(&mut self, quote: OddsQuote) -> bool {
        match self.records.get_mut(&quote.event_id()) {
            Some(record) => record.replace_odds(quote).is_ok(),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.ordered.clear();
    }

    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&MergedRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EventId) -> bool {
        self.records.contains_key(&id)
    }

    /// Ids in display order.
    #[must_use]
    pub fn ordered_ids(&self) -> &[EventId] {
        &self.ordered
    }

    /// Snapshot of every record in display order.
    #[must_use]
    pub fn ordered_records(&self) -> Vec<MergedRecord> {
        self.ordered
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
