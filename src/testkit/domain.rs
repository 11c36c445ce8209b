//! Builders for domain primitives used across tests.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::{Event, EventId, MergedRecord, OddsQuote};

/// Build a quote without validation.
pub fn quote(id: i64, odds_a: Decimal, odds_b: Decimal) -> OddsQuote {
    OddsQuote::new(EventId::new(id), odds_a, odds_b)
}

/// Build an event starting `offset_secs` from now (negative for the past).
pub fn event_at(id: i64, offset_secs: i64) -> Event {
    Event::new(
        EventId::new(id),
        format!("TeamA{id}"),
        format!("TeamB{id}"),
        Utc::now() + Duration::seconds(offset_secs),
    )
}

/// Build a record starting `offset_secs` from now with default odds.
pub fn record_at(id: i64, offset_secs: i64) -> MergedRecord {
    let odds = quote(id, Decimal::new(150, 2), Decimal::new(250, 2));
    MergedRecord::try_new(event_at(id, offset_secs), odds).expect("ids match")
}

/// `count` future records with consecutive ids from `id_start`.
///
/// The first starts ten minutes from now, each next one a minute later, so
/// display order equals id order.
pub fn records(count: usize, id_start: i64) -> Vec<MergedRecord> {
    (0..count as i64)
        .map(|offset| {
            let id = id_start + offset;
            let odds = quote(
                id,
                Decimal::new(150 + offset, 2),
                Decimal::new(250 + offset, 2),
            );
            MergedRecord::try_new(event_at(id, 600 + offset * 60), odds).expect("ids match")
        })
        .collect()
}

/// Split records back into their event and odds collections.
pub fn split(records: &[MergedRecord]) -> (Vec<Event>, Vec<OddsQuote>) {
    records
        .iter()
        .map(|record| (record.event().clone(), record.odds().clone()))
        .unzip()
}

/// Ids of `records`, in order.
pub fn ids(records: &[MergedRecord]) -> Vec<EventId> {
    records.iter().map(MergedRecord::id).collect()
}
