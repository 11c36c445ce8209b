//! Reconnecting wrapper for [`OddsStream`].
//!
//! Provides automatic reconnection with exponential backoff and circuit
//! breaker protection for any [`OddsStream`] implementation. The wrapper
//! handles transport drops itself and resubscribes to the last id set, so
//! the consumer only ever sees batches.

use std::pin::Pin;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;
use tokio::time::{sleep, Sleep};
use tracing::{debug, error, info, warn};

use crate::domain::EventId;
use crate::error::Result;
use crate::infrastructure::config::reconnection::ReconnectionConfig;
use crate::port::{OddsStream, StreamEvent};

/// Circuit breaker state for connection attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CircuitState {
    /// Normal operation; connections are allowed.
    Closed,
    /// Too many consecutive failures; connections blocked until cooldown expires.
    Open {
        /// Instant when the circuit breaker will transition back to Closed.
        until: Instant,
    },
}

/// Wrapper that adds automatic reconnection to any [`OddsStream`].
///
/// On a `Disconnected` event or end of stream it:
/// 1. Waits with exponential backoff
/// 2. Reconnects the inner stream for the last subscribed ids
///
/// A circuit breaker trips after too many consecutive failures. After an
/// explicit [`disconnect`](OddsStream::disconnect) nothing is reconnected
/// until the next `connect`.
///
/// The pending backoff wait is kept in the struct, so a `next_event` future
/// dropped by `select!` resumes the same wait on the next poll.
pub struct ReconnectingOddsStream<S: OddsStream> {
    /// The underlying stream being wrapped.
    inner: S,
    /// Reconnection and backoff configuration.
    config: ReconnectionConfig,
    /// Ids to resubscribe after reconnection; `None` after `disconnect`.
    subscribed: Option<Vec<EventId>>,
    /// Current consecutive failure count.
    consecutive_failures: u32,
    /// Current backoff delay in milliseconds.
    current_delay_ms: u64,
    /// Circuit breaker state.
    circuit_state: CircuitState,
    /// Whether the inner stream is currently connected.
    connected: bool,
    /// Backoff wait before the next reconnect attempt, armed once per attempt
    /// and cleared when the attempt completes.
    reconnect_wait: Option<Pin<Box<Sleep>>>,
}

impl<S: OddsStream> ReconnectingOddsStream<S> {
    /// Create a new reconnecting wrapper around a stream.
    ///
    /// The wrapper starts disconnected; call `connect` before reading events.
    pub fn new(inner: S, config: ReconnectionConfig) -> Self {
        let initial_delay = config.initial_delay_ms;
        Self {
            inner,
            config,
            subscribed: None,
            consecutive_failures: 0,
            current_delay_ms: initial_delay,
            circuit_state: CircuitState::Closed,
            connected: false,
            reconnect_wait: None,
        }
    }

    /// Reset backoff state after a successful connection.
    fn reset_backoff(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay_ms = self.config.initial_delay_ms;
        self.circuit_state = CircuitState::Closed;
    }

    /// The current delay plus jitter.
    fn backoff_delay(&self) -> Duration {
        let base_delay = Duration::from_millis(self.current_delay_ms);
        base_delay + Duration::from_millis(Self::jitter_ms(base_delay))
    }

    /// Grow the delay for the next attempt, capped at the configured maximum.
    fn advance_backoff(&mut self) {
        let next_delay = (self.current_delay_ms as f64 * self.config.backoff_multiplier) as u64;
        self.current_delay_ms = next_delay.min(self.config.max_delay_ms);
    }

    /// Up to 20% random jitter.
    fn jitter_ms(base_delay: Duration) -> u64 {
        let jitter_range_ms = (base_delay.as_millis() as u64) / 5;
        if jitter_range_ms == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..=jitter_range_ms)
    }

    /// Whether the circuit breaker allows a connection attempt.
    ///
    /// Closes the circuit again once the cooldown has expired.
    fn circuit_allows_connection(&mut self) -> bool {
        match self.circuit_state {
            CircuitState::Closed => true,
            CircuitState::Open { until } => {
                if Instant::now() >= until {
                    info!("Circuit breaker cooldown expired, allowing reconnection");
                    self.reset_backoff();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Count a failure and trip the breaker at the threshold.
    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        self.connected = false;

        if self.consecutive_failures >= self.config.max_consecutive_failures {
            let cooldown = Duration::from_millis(self.config.circuit_breaker_cooldown_ms);
            self.circuit_state = CircuitState::Open {
                until: Instant::now() + cooldown,
            };
            error!(
                failures = self.consecutive_failures,
                cooldown_secs = cooldown.as_secs(),
                "Circuit breaker tripped, pausing reconnection attempts"
            );
        }
    }

    /// Wait for the next attempt, covering any remaining breaker cooldown.
    fn arm_reconnect(&mut self) -> Pin<Box<Sleep>> {
        let mut cooldown = Duration::ZERO;
        if !self.circuit_allows_connection() {
            if let CircuitState::Open { until } = self.circuit_state {
                cooldown = until.saturating_duration_since(Instant::now());
                warn!(
                    remaining_secs = cooldown.as_secs(),
                    "Circuit breaker open, waiting for cooldown"
                );
                self.reset_backoff();
            }
        }

        let delay = self.backoff_delay();
        info!(
            delay_ms = delay.as_millis(),
            attempt = self.consecutive_failures + 1,
            "Reconnecting odds stream after delay"
        );
        Box::pin(sleep(cooldown + delay))
    }

    async fn reconnect(&mut self, ids: &[EventId]) -> Result<()> {
        if self.reconnect_wait.is_none() {
            self.reconnect_wait = Some(self.arm_reconnect());
        }
        if let Some(wait) = self.reconnect_wait.as_mut() {
            // An elapsed sleep completes immediately when polled again.
            wait.as_mut().await;
        }

        let result = self.inner.connect(ids).await;
        self.reconnect_wait = None;
        self.advance_backoff();

        match result {
            Ok(()) => {
                info!(events = ids.len(), "Odds stream reconnected");
                self.connected = true;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Reconnection failed");
                self.record_failure();
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<S: OddsStream> OddsStream for ReconnectingOddsStream<S> {
    async fn connect(&mut self, event_ids: &[EventId]) -> Result<()> {
        self.subscribed = Some(event_ids.to_vec());
        self.reconnect_wait = None;
        let result = self.inner.connect(event_ids).await;
        if result.is_ok() {
            self.connected = true;
            self.reset_backoff();
        } else {
            self.connected = false;
        }
        result
    }

    async fn disconnect(&mut self) {
        self.subscribed = None;
        self.reconnect_wait = None;
        self.connected = false;
        self.inner.disconnect().await;
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        loop {
            let Some(ids) = self.subscribed.clone() else {
                return std::future::pending().await;
            };

            if !self.connected {
                if let Err(err) = self.reconnect(&ids).await {
                    warn!(error = %err, "Reconnection attempt failed, will retry");
                    continue;
                }
            }

            match self.inner.next_event().await {
                Some(StreamEvent::Disconnected { reason }) => {
                    warn!(reason = %reason, "Odds stream lost, will reconnect");
                    self.record_failure();
                }
                Some(event) => {
                    if self.consecutive_failures > 0 {
                        debug!("Received batch after reconnection, resetting failure count");
                        self.reset_backoff();
                    }
                    return Some(event);
                }
                None => {
                    warn!("Odds stream ended unexpectedly, will reconnect");
                    self.record_failure();
                }
            }
        }
    }

    fn stream_name(&self) -> &'static str {
        self.inner.stream_name()
    }
}
