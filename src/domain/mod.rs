//! Source-agnostic domain types.
//!
//! - [`Event`] - an immutable scheduled match
//! - [`OddsQuote`] - the replaceable odds for an event
//! - [`MergedRecord`] - an event joined with its current odds
//! - [`LoadState`] - the feed's load lifecycle

pub mod error;
pub mod event;
pub mod id;
pub mod odds;
pub mod record;
pub mod state;

pub use error::DomainError;
pub use event::Event;
pub use id::EventId;
pub use odds::OddsQuote;
pub use record::MergedRecord;
pub use state::LoadState;
