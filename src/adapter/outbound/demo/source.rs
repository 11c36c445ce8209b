//! In-process event source serving generated matches.
//!
//! Behaves like a tiny read API: it routes request paths, encodes the
//! collections to JSON and decodes them again, so a payload the wire types
//! cannot represent surfaces as [`SourceError::DecodeFailed`] exactly as it
//! would over HTTP.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::info;

use super::settings::DemoSourceConfig;
use crate::adapter::outbound::http::dto::{EventDto, OddsDto};
use crate::domain::{Event, OddsQuote};
use crate::error::SourceError;
use crate::port::EventSource;

/// Path of the events collection.
pub const EVENTS_PATH: &str = "/events";
/// Path of the odds collection.
pub const ODDS_PATH: &str = "/odds";

/// First id of a generated data set.
pub const FIRST_EVENT_ID: i64 = 1001;

/// Team names the generator draws from.
pub const TEAM_ROSTER: [&str; 30] = [
    "Eagles", "Tigers", "Lions", "Bears", "Wolves", "Hawks", "Panthers", "Sharks", "Dragons",
    "Cobras", "Falcons", "Stallions", "Thunder", "Lightning", "Blaze", "Vipers", "Raptors",
    "Knights", "Warriors", "Titans", "Phoenix", "Hurricanes", "Bulldogs", "Cougars", "Mustangs",
    "Ravens", "Scorpions", "Jaguars", "Hornets", "Spartans",
];

/// Earliest start, seconds from now.
const MIN_START_SECS: i64 = 30 * 60;
/// Latest start, seconds from now.
const MAX_START_SECS: i64 = 7 * 24 * 60 * 60;
/// Odds range in hundredths.
const MIN_ODDS_CENTS: i64 = 110;
const MAX_ODDS_CENTS: i64 = 500;

#[derive(Default)]
struct DemoData {
    events: Vec<EventDto>,
    odds: Vec<OddsDto>,
}

impl DemoData {
    fn generate(count: usize) -> Self {
        let mut data = Self::default();
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        let mut next_id = FIRST_EVENT_ID;

        while data.events.len() < count {
            let mut teams = TEAM_ROSTER.choose_multiple(&mut rng, 2);
            let (team_a, team_b) = match (teams.next(), teams.next()) {
                (Some(a), Some(b)) => (*a, *b),
                _ => break,
            };

            data.events.push(EventDto {
                match_id: next_id,
                team_a: team_a.to_string(),
                team_b: team_b.to_string(),
                start_time: now + Duration::seconds(rng.gen_range(MIN_START_SECS..=MAX_START_SECS)),
            });
            data.odds.push(OddsDto {
                match_id: next_id,
                team_a_odds: random_odds(&mut rng),
                team_b_odds: random_odds(&mut rng),
            });
            next_id += 1;
        }
        data
    }
}

/// Uniform odds in 1.10..=5.00 with two decimal places.
pub fn random_odds<R: Rng>(rng: &mut R) -> Decimal {
    Decimal::new(rng.gen_range(MIN_ODDS_CENTS..=MAX_ODDS_CENTS), 2)
}

/// [`EventSource`] backed by generated in-memory data.
pub struct DemoEventSource {
    event_count: usize,
    data: RwLock<DemoData>,
}

impl DemoEventSource {
    #[must_use]
    pub fn new(event_count: usize) -> Self {
        info!(event_count, "Generating demo events");
        Self {
            event_count,
            data: RwLock::new(DemoData::generate(event_count)),
        }
    }

    #[must_use]
    pub fn from_config(config: &DemoSourceConfig) -> Self {
        Self::new(config.event_count)
    }

    /// Number of events currently served.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve `path` the way the remote API would.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let json = {
            let data = self.data.read();
            match path {
                EVENTS_PATH => serde_json::to_vec(&data.events)?,
                ODDS_PATH => serde_json::to_vec(&data.odds)?,
                _ => {
                    return Err(SourceError::InvalidRequest {
                        path: path.to_string(),
                    })
                }
            }
        };
        Ok(serde_json::from_slice(&json)?)
    }
}

#[async_trait]
impl EventSource for DemoEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        let events: Vec<EventDto> = self.get(EVENTS_PATH)?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn fetch_odds(&self) -> Result<Vec<OddsQuote>, SourceError> {
        let odds: Vec<OddsDto> = self.get(ODDS_PATH)?;
        odds.into_iter()
            .map(|dto| OddsQuote::try_from(dto).map_err(SourceError::from))
            .collect()
    }

    async fn reset(&self) -> Result<(), SourceError> {
        *self.data.write() = DemoData::generate(self.event_count);
        info!(events = self.event_count, "Demo data regenerated");
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventId;
    use std::collections::HashSet;

    fn event_ids(events: &[Event]) -> Vec<EventId> {
        events.iter().map(Event::id).collect()
    }

    #[tokio::test]
    async fn test_generates_configured_data_set() {
        let source = DemoEventSource::new(100);
        let events = source.fetch_events().await.unwrap();
        let odds = source.fetch_odds().await.unwrap();

        assert_eq!(events.len(), 100);
        assert_eq!(odds.len(), 100);
        assert_eq!(events[0].id(), EventId::new(FIRST_EVENT_ID));
        assert_eq!(events[99].id(), EventId::new(FIRST_EVENT_ID + 99));

        let now = Utc::now();
        for event in &events {
            assert_ne!(event.participant_a(), event.participant_b());
            assert!(TEAM_ROSTER.contains(&event.participant_a()));
            let ahead = event.start_time() - now;
            assert!(ahead > Duration::minutes(29) && ahead <= Duration::days(7));
        }
        for quote in &odds {
            for value in [quote.odds_a(), quote.odds_b()] {
                assert!(value >= Decimal::new(110, 2) && value <= Decimal::new(500, 2));
                assert!(value.scale() <= 2);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_invalid_request() {
        let source = DemoEventSource::new(3);
        let err = source.get::<Vec<EventDto>>("/matches").unwrap_err();
        assert!(matches!(err, SourceError::InvalidRequest { path } if path == "/matches"));
    }

    #[tokio::test]
    async fn test_mismatched_payload_is_decode_failure() {
        let source = DemoEventSource::new(3);
        let err = source.get::<Vec<EventDto>>(ODDS_PATH).unwrap_err();
        assert!(matches!(err, SourceError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn test_reset_regenerates_to_configured_size() {
        let source = DemoEventSource::new(10);

        source.reset().await.unwrap();
        source.reset().await.unwrap();

        let ids = event_ids(&source.fetch_events().await.unwrap());
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(source.len(), 10);
        assert_eq!(unique.len(), 10);
        assert_eq!(ids[0], EventId::new(FIRST_EVENT_ID));
        assert_eq!(source.fetch_odds().await.unwrap().len(), 10);
    }
}
