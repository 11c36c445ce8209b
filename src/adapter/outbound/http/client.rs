//! REST client for the remote events and odds collections.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::dto::{EventDto, OddsDto};
use super::settings::HttpSourceConfig;
use crate::domain::{Event, OddsQuote};
use crate::error::SourceError;
use crate::port::EventSource;

/// [`EventSource`] over HTTP.
///
/// Each call is a single request; retrying is left to the bulk fetcher.
pub struct HttpEventSource {
    http: HttpClient,
    base_url: String,
    events_path: String,
    odds_path: String,
    reset_path: Option<String>,
}

impl HttpEventSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), &HttpSourceConfig {
            base_url: base_url.into(),
            ..HttpSourceConfig::default()
        })
    }

    #[must_use]
    pub fn from_config(config: &HttpSourceConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self::with_client(http, config)
    }

    fn with_client(http: HttpClient, config: &HttpSourceConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            events_path: config.events_path.clone(),
            odds_path: config.odds_path.clone(),
            reset_path: config.reset_path.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| SourceError::RequestFailed(err.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::InvalidRequest {
                path: path.to_string(),
            });
        }
        let response = response.error_for_status()?;

        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::RequestFailed(err.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        let events: Vec<EventDto> = self.get_json(&self.events_path).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn fetch_odds(&self) -> Result<Vec<OddsQuote>, SourceError> {
        let odds: Vec<OddsDto> = self.get_json(&self.odds_path).await?;
        debug!(count = odds.len(), "Fetched odds");
        odds.into_iter()
            .map(|dto| OddsQuote::try_from(dto).map_err(SourceError::from))
            .collect()
    }

    async fn reset(&self) -> Result<(), SourceError> {
        let Some(path) = &self.reset_path else {
            return Ok(());
        };
        let url = self.url(path);
        info!(url = %url, "Resetting remote source");
        self.http
            .post(&url)
            .send()
            .await
            .map_err(|err| SourceError::RequestFailed(err.to_string()))?
            .error_for_status()?;
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let source = HttpEventSource::new("https://feed.example.com/api/");
        assert_eq!(source.url("/events"), "https://feed.example.com/api/events");
        assert_eq!(source.url("odds"), "https://feed.example.com/api/odds");
    }

    #[test]
    fn test_from_config_keeps_paths() {
        let config = HttpSourceConfig {
            base_url: "http://localhost:8080".into(),
            events_path: "/v2/matches".into(),
            reset_path: Some("/reset".into()),
            ..HttpSourceConfig::default()
        };
        let source = HttpEventSource::from_config(&config);

        assert_eq!(source.url(&source.events_path), "http://localhost:8080/v2/matches");
        assert_eq!(source.reset_path.as_deref(), Some("/reset"));
        assert_eq!(source.source_name(), "http");
    }

    #[tokio::test]
    async fn test_reset_without_path_is_noop() {
        let source = HttpEventSource::new("http://127.0.0.1:9");
        assert!(source.reset().await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_failure() {
        let config = HttpSourceConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_ms: 500,
            connect_timeout_ms: 200,
            ..HttpSourceConfig::default()
        };
        let source = HttpEventSource::from_config(&config);

        let err = source.fetch_events().await.unwrap_err();
        assert!(matches!(err, SourceError::RequestFailed(_)), "{err}");
    }
}
