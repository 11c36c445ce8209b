//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the sync core meets the outside world. The
//! core never talks to a file, a socket or an HTTP client directly; it holds
//! one implementation of each port and drives it through these traits.
//!
//! ```text
//!                  ┌─────────────────────────┐
//!                  │     Sync orchestrator   │
//!     ┌────────────┤   (application layer)   ├────────────┐
//!     │            └─────────────────────────┘            │
//!     ▼                        ▼                          ▼
//! ┌──────────┐          ┌─────────────┐            ┌────────────┐
//! │ Snapshot │          │ EventSource │            │ OddsStream │
//! │  Store   │          │  (bulk)     │            │  (push)    │
//! └──────────┘          └─────────────┘            └────────────┘
//! ```

pub mod outbound;

pub use outbound::source::EventSource;
pub use outbound::store::SnapshotStore;
pub use outbound::stream::{OddsStream, StreamEvent};
