//! HTTP implementation of the event source.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::HttpEventSource;
pub use settings::HttpSourceConfig;
