//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use oddsync::domain::error::DomainError;
//! use oddsync::domain::{EventId, OddsQuote};
//! use rust_decimal_macros::dec;
//!
//! let result = OddsQuote::try_new(EventId::new(7), dec!(0), dec!(1.80));
//! assert!(matches!(result, Err(DomainError::NonPositiveOdds { .. })));
//! ```

use thiserror::Error;

use super::id::EventId;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Odds must be strictly positive decimals.
    #[error("odds for event {event_id} must be positive, got {odds}")]
    NonPositiveOdds {
        /// The event the quote belongs to.
        event_id: EventId,
        /// The invalid odds value.
        odds: rust_decimal::Decimal,
    },

    /// A merged record must pair an event with its own quote.
    #[error("quote for event {quote} cannot be attached to event {event}")]
    MismatchedQuote {
        /// Id of the event.
        event: EventId,
        /// Id carried by the quote.
        quote: EventId,
    },
}
