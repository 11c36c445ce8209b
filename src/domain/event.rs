//! Scheduled sporting events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::EventId;

/// A schedulable item with two named participants and a start instant.
///
/// Events are immutable once fetched; only their odds change over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    participant_a: String,
    participant_b: String,
    start_time: DateTime<Utc>,
}

impl Event {
    /// Create a new event.
    pub fn new(
        id: EventId,
        participant_a: impl Into<String>,
        participant_b: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            participant_a: participant_a.into(),
            participant_b: participant_b.into(),
            start_time,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn participant_a(&self) -> &str {
        &self.participant_a
    }

    #[must_use]
    pub fn participant_b(&self) -> &str {
        &self.participant_b
    }

    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// True when the event starts strictly after `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }
}
