//! Application services (use cases).
//!
//! These services implement the feed's synchronization logic on top of the
//! outbound ports; the orchestrator in [`sync`] ties them together.

pub mod feed;
pub mod fetch;
pub mod pagination;
pub mod persistence;
pub mod reconcile;
pub mod store;
pub mod sync;

pub use feed::{Feed, FeedEvent};
pub use fetch::{BulkFetcher, RetryPolicy};
pub use persistence::PersistenceGateway;
pub use sync::{SyncHandle, SyncOrchestrator, SyncSettings};
