//! Wire types for the events and odds collections.
//!
//! Field names follow the remote API (`matchID`, `teamA`, ...); snake_case
//! aliases are accepted too. Conversion into domain types validates odds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Event, EventId, OddsQuote};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(rename = "matchID", alias = "id", alias = "event_id")]
    pub match_id: i64,
    #[serde(alias = "participant_a")]
    pub team_a: String,
    #[serde(alias = "participant_b")]
    pub team_b: String,
    #[serde(alias = "start_time")]
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsDto {
    #[serde(rename = "matchID", alias = "id", alias = "event_id")]
    pub match_id: i64,
    #[serde(rename = "teamAOdds", alias = "odds_a")]
    pub team_a_odds: Decimal,
    #[serde(rename = "teamBOdds", alias = "odds_b")]
    pub team_b_odds: Decimal,
}

impl From<&Event> for EventDto {
    fn from(event: &Event) -> Self {
        Self {
            match_id: event.id().value(),
            team_a: event.participant_a().to_string(),
            team_b: event.participant_b().to_string(),
            start_time: event.start_time(),
        }
    }
}

impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        Event::new(EventId::new(dto.match_id), dto.team_a, dto.team_b, dto.start_time)
    }
}

impl From<&OddsQuote> for OddsDto {
    fn from(quote: &OddsQuote) -> Self {
        Self {
            match_id: quote.event_id().value(),
            team_a_odds: quote.odds_a(),
            team_b_odds: quote.odds_b(),
        }
    }
}

impl TryFrom<OddsDto> for OddsQuote {
    type Error = DomainError;

    fn try_from(dto: OddsDto) -> Result<Self, Self::Error> {
        OddsQuote::try_new(EventId::new(dto.match_id), dto.team_a_odds, dto.team_b_odds)
    }
}
