//! Self-contained demo source and odds stream.

pub mod settings;
pub mod source;
pub mod stream;

pub use settings::DemoSourceConfig;
pub use source::DemoEventSource;
pub use stream::DemoOddsStream;
