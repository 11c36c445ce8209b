//! Events joined with their current odds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::event::Event;
use super::id::EventId;
use super::odds::OddsQuote;

/// The join of one [`Event`] with its current [`OddsQuote`].
///
/// A record only exists when both halves are known; there is no
/// placeholder-odds form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    event: Event,
    odds: OddsQuote,
}

impl MergedRecord {
    /// Pair an event with its quote.
    pub fn try_new(event: Event, odds: OddsQuote) -> Result<Self, DomainError> {
        if event.id() != odds.event_id() {
            return Err(DomainError::MismatchedQuote {
                event: event.id(),
                quote: odds.event_id(),
            });
        }
        Ok(Self { event, odds })
    }

    #[must_use]
    pub const fn id(&self) -> EventId {
        self.event.id()
    }

    #[must_use]
    pub const fn event(&self) -> &Event {
        &self.event
    }

    #[must_use]
    pub const fn odds(&self) -> &OddsQuote {
        &self.odds
    }

    /// Replace the quote, keeping the event.
    ///
    /// Quotes for a different event are rejected.
    pub fn replace_odds(&mut self, odds: OddsQuote) -> Result<(), DomainError> {
        if odds.event_id() != self.id() {
            return Err(DomainError::MismatchedQuote {
                event: self.id(),
                quote: odds.event_id(),
            });
        }
        self.odds = odds;
        Ok(())
    }

    /// Key used to order records: start time first, id breaks ties.
    #[must_use]
    pub fn sort_key(&self) -> (DateTime<Utc>, EventId) {
        (self.event.start_time(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn event(id: i64) -> Event {
        Event::new(EventId::new(id), "Lions", "Bears", Utc::now())
    }

    #[test]
    fn test_try_new_rejects_foreign_quote() {
        let quote = OddsQuote::new(EventId::new(2), dec!(1.5), dec!(2.5));
        let result = MergedRecord::try_new(event(1), quote);
        assert!(matches!(result, Err(DomainError::MismatchedQuote { .. })));
    }

    #[test]
    fn test_replace_odds_swaps_whole_quote() {
        let mut record =
            MergedRecord::try_new(event(1), OddsQuote::new(EventId::new(1), dec!(1.5), dec!(2.5)))
                .unwrap();

        record
            .replace_odds(OddsQuote::new(EventId::new(1), dec!(3.21), dec!(1.89)))
            .unwrap();

        assert_eq!(record.odds().odds_a(), dec!(3.21));
        assert_eq!(record.odds().odds_b(), dec!(1.89));
        assert!(record
            .replace_odds(OddsQuote::new(EventId::new(9), dec!(1), dec!(1)))
            .is_err());
    }
}
