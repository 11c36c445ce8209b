//! Odds quotes attached to events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::EventId;

/// Current decimal odds for both participants of an event.
///
/// A quote is never patched field by field: a newer quote for the same event
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsQuote {
    event_id: EventId,
    odds_a: Decimal,
    odds_b: Decimal,
}

impl OddsQuote {
    /// Create a quote without validation.
    ///
    /// Prefer [`OddsQuote::try_new`] for values coming from outside the crate.
    #[must_use]
    pub const fn new(event_id: EventId, odds_a: Decimal, odds_b: Decimal) -> Self {
        Self {
            event_id,
            odds_a,
            odds_b,
        }
    }

    /// Create a quote, rejecting non-positive odds.
    pub fn try_new(event_id: EventId, odds_a: Decimal, odds_b: Decimal) -> Result<Self, DomainError> {
        for odds in [odds_a, odds_b] {
            if odds <= Decimal::ZERO {
                return Err(DomainError::NonPositiveOdds { event_id, odds });
            }
        }
        Ok(Self::new(event_id, odds_a, odds_b))
    }

    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    #[must_use]
    pub const fn odds_a(&self) -> Decimal {
        self.odds_a
    }

    #[must_use]
    pub const fn odds_b(&self) -> Decimal {
        self.odds_b
    }
}
