//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for events, quotes and merged records.
//! - [`source`] - `ScriptedSource`, an [`EventSource`](crate::port::EventSource)
//!   with scripted failures and a gate for holding a fetch in flight.
//! - [`store`] - `MemoryStore`, an in-memory
//!   [`SnapshotStore`](crate::port::SnapshotStore).
//! - [`stream`] - Mock [`OddsStream`](crate::port::OddsStream)
//!   implementations: `ScriptedOddsStream`, `ChannelOddsStream`.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod source;
pub mod store;
pub mod stream;
