//! oddsync - a live, paginated odds feed.
//!
//! Keeps a list of upcoming matches and their odds in sync from three
//! places: a local snapshot for a fast warm start, a bulk source that is
//! the authority for the full data set, and a push stream that changes odds
//! in place. Records are revealed a page at a time.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] - events, odds quotes, merged records and the load state
//! - [`port`] - traits for the snapshot store, the bulk source and the
//!   odds stream
//! - [`application`] - record store, reconciliation, pagination, the retrying
//!   bulk fetcher, the persistence gateway and the sync orchestrator
//! - [`adapter`] - JSON file store, HTTP and demo sources, demo stream and
//!   the reconnecting stream wrapper
//! - [`infrastructure`] - configuration and wiring
//! - [`cli`] - the `oddsync` command line
//!
//! # Example
//!
//! ```no_run
//! use oddsync::infrastructure::bootstrap;
//! use oddsync::infrastructure::config::Config;
//!
//! # async fn example() -> oddsync::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let (handle, task) = bootstrap::build_orchestrator(&config).spawn();
//!
//! handle.load_next_page()?;
//! handle.wait_for_state(|state| state.is_loaded()).await?;
//! for record in handle.visible_records() {
//!     println!("{} {}", record.id(), record.odds().odds_a());
//! }
//!
//! handle.suspend()?;
//! handle.shutdown()?;
//! let _ = task.await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
