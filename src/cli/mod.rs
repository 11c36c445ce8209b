//! Command-line interface definitions.

pub mod cache;
pub mod check;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// oddsync - a live, paginated odds feed.
#[derive(Parser, Debug)]
#[command(name = "oddsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the feed, print the visible window and follow odds updates
    Run(RunArgs),

    /// Delete the cached snapshot
    ClearCache,

    /// Validate configuration file
    CheckConfig,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Number of pages to show
    #[arg(short, long, default_value = "1")]
    pub pages: usize,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub duration: Option<u64>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}
