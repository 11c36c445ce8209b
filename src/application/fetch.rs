//! Bulk fetch with bounded retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::reconcile::merge_bulk;
use crate::domain::MergedRecord;
use crate::error::{FetchError, SourceError};
use crate::port::EventSource;

/// Default attempts per call before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retry settings for a single bulk call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first one.
    pub max_attempts: u32,
    /// Constant delay between attempts (milliseconds).
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_ms: 0,
        }
    }
}

/// Fetches events and odds concurrently and joins them.
pub struct BulkFetcher {
    source: Arc<dyn EventSource>,
    policy: RetryPolicy,
}

impl BulkFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn EventSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch both collections and merge them into display order.
    ///
    /// Both calls run concurrently and are retried independently. Nothing is
    /// returned unless both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::FetchFailed`] for the first call that exhausts
    /// its attempts.
    pub async fn fetch(&self) -> Result<Vec<MergedRecord>, FetchError> {
        let (events, odds) = tokio::try_join!(
            self.with_retry("events", || self.source.fetch_events()),
            self.with_retry("odds", || self.source.fetch_odds()),
        )?;

        let fetched = events.len();
        let merged = merge_bulk(events, odds);
        info!(
            source = self.source.source_name(),
            events = fetched,
            records = merged.len(),
            "Bulk fetch complete"
        );
        Ok(merged)
    }

    /// Ask the source to drop its demo state. Failures are logged only.
    pub async fn reset_source(&self) {
        match self.source.reset().await {
            Ok(()) => debug!(source = self.source.source_name(), "Source reset"),
            Err(err) => warn!(
                source = self.source.source_name(),
                error = %err,
                "Source reset failed"
            ),
        }
    }

    async fn with_retry<T, F, Fut>(&self, resource: &'static str, mut call: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let give_up = attempt >= max_attempts || !Self::should_retry(&err);
                    if give_up {
                        return Err(FetchError::FetchFailed {
                            resource,
                            attempts: attempt,
                            source: err,
                        });
                    }
                    warn!(
                        resource,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Bulk fetch failed, retrying"
                    );
                    if self.policy.backoff_ms > 0 {
                        sleep(Duration::from_millis(self.policy.backoff_ms)).await;
                    }
                }
            }
        }
    }

    fn should_retry(err: &SourceError) -> bool {
        !matches!(err, SourceError::InvalidRequest { .. })
    }
}
