//! Configuration loading and validation.

pub mod logging;
pub mod reconnection;
pub mod settings;
pub mod storage;
pub mod stream;
pub mod sync;

pub use settings::{Config, SourceConfig};
