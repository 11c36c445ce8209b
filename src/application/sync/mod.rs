//! Sync orchestration: the feed's state machine and its handle.
//!
//! ```text
//!   SyncHandle ──Command──▶ SyncOrchestrator task ──▶ Feed (RwLock read model)
//!                               ▲        │                 │
//!               Completion ─────┘        │                 ├─ broadcast<FeedEvent>
//!   (cache load / bulk fetch tasks)      │                 └─ watch<LoadState>
//!                                        ▼
//!                          OddsStream / PersistenceGateway
//! ```

mod command;
mod handle;
mod orchestrator;

pub use handle::SyncHandle;
pub use orchestrator::{SyncOrchestrator, SyncSettings};
