//! Handler for the `check-config` command.

use std::path::Path;

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::{Config, SourceConfig};

/// Validate configuration file without starting the feed.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::note(&format!("Checking configuration: {}", path.display()));

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    output::section("Feed");
    output::key_value("Page size", config.sync.page_size);
    output::key_value(
        "Checkpoint",
        format!("every {}s", config.sync.checkpoint_interval_secs),
    );
    output::key_value("Fetch attempts", config.fetch.max_attempts);

    output::section("Source");
    output::key_value("Type", config.source.kind());
    match &config.source {
        SourceConfig::Demo(demo) => output::key_value("Events", demo.event_count),
        SourceConfig::Http(http) => {
            output::key_value("Base URL", &http.base_url);
            output::key_value("Events path", &http.events_path);
            output::key_value("Odds path", &http.odds_path);
            output::key_value(
                "Reset path",
                http.reset_path.as_deref().unwrap_or("(none)"),
            );
        }
    }

    output::section("Stream");
    output::key_value("Tick", format!("{}ms", config.stream.tick_ms));
    output::key_value("Max batch", config.stream.max_batch);
    output::key_value(
        "Reconnect",
        if config.stream.reconnect { "on" } else { "off" },
    );

    output::section("Storage");
    output::key_value("Snapshot", config.storage.snapshot_path().display());
    if config.storage.path.is_none() {
        output::note("  (platform cache directory)");
    }

    println!();
    output::ok("Configuration is ready to use.");
    Ok(())
}
