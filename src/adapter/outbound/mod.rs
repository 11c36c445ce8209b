//! Outbound adapters (driven side).

pub mod demo;
pub mod file;
pub mod http;
pub mod reconnecting;

pub use demo::{DemoEventSource, DemoOddsStream};
pub use file::JsonFileStore;
pub use http::HttpEventSource;
pub use reconnecting::ReconnectingOddsStream;
