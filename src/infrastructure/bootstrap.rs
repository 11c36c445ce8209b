//! Composition root: builds adapters and the orchestrator from [`Config`].

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::{
    DemoEventSource, DemoOddsStream, HttpEventSource, JsonFileStore, ReconnectingOddsStream,
};
use crate::application::{BulkFetcher, PersistenceGateway, RetryPolicy, SyncOrchestrator};
use crate::infrastructure::config::{Config, SourceConfig};
use crate::port::{EventSource, OddsStream, SnapshotStore};

/// Build the bulk event source selected by `[source]`.
#[must_use]
pub fn build_source(config: &Config) -> Arc<dyn EventSource> {
    match &config.source {
        SourceConfig::Demo(demo) => Arc::new(DemoEventSource::from_config(demo)),
        SourceConfig::Http(http) => Arc::new(HttpEventSource::from_config(http)),
    }
}

/// Build the odds stream, wrapped for reconnection when enabled.
#[must_use]
pub fn build_stream(config: &Config) -> Box<dyn OddsStream> {
    let demo = DemoOddsStream::new(
        Duration::from_millis(config.stream.tick_ms),
        config.stream.max_batch,
    );
    if config.stream.reconnect {
        Box::new(ReconnectingOddsStream::new(
            demo,
            config.reconnection.clone(),
        ))
    } else {
        Box::new(demo)
    }
}

/// Build the snapshot store at the configured path.
#[must_use]
pub fn build_store(config: &Config) -> Arc<dyn SnapshotStore> {
    Arc::new(JsonFileStore::new(config.storage.snapshot_path()))
}

/// Wire a ready-to-spawn orchestrator from configuration.
#[must_use]
pub fn build_orchestrator(config: &Config) -> SyncOrchestrator {
    let source = build_source(config);
    let store_path = config.storage.snapshot_path();
    info!(
        source = config.source.kind(),
        snapshot = %store_path.display(),
        reconnect = config.stream.reconnect,
        "Building feed"
    );

    SyncOrchestrator::new(
        BulkFetcher::new(source, RetryPolicy::from(&config.fetch)),
        PersistenceGateway::new(build_store(config)),
        build_stream(config),
        (&config.sync).into(),
    )
}
