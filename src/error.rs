use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a single call against a bulk event source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source does not serve the requested path. Programmer error.
    #[error("invalid request path: {path}")]
    InvalidRequest { path: String },

    /// The payload could not be decoded into domain records.
    #[error("failed to decode response: {0}")]
    DecodeFailed(String),

    /// The request did not complete.
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailed(err.to_string())
    }
}

impl From<DomainError> for SourceError {
    fn from(err: DomainError) -> Self {
        Self::DecodeFailed(err.to_string())
    }
}

/// Bulk fetch errors surfaced to the feed after retries.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch {resource} after {attempts} attempts: {source}")]
    FetchFailed {
        resource: &'static str,
        attempts: u32,
        #[source]
        source: SourceError,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed failed to load: {0}")]
    LoadFailed(String),

    #[error("feed is shut down")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
