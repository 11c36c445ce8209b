//! Handler for the `run` command.

use std::time::Duration;

use chrono::Utc;
use tabled::{Table, Tabled};
use tokio::signal;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::application::{FeedEvent, SyncHandle};
use crate::cli::{output, Cli, RunArgs};
use crate::domain::{EventId, LoadState, MergedRecord};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Match")]
    matchup: String,
    #[tabled(rename = "Starts (UTC)")]
    starts: String,
    #[tabled(rename = "Odds A")]
    odds_a: String,
    #[tabled(rename = "Odds B")]
    odds_b: String,
}

impl RecordRow {
    fn new(position: usize, record: &MergedRecord) -> Self {
        let event = record.event();
        Self {
            position,
            id: record.id().value(),
            matchup: format!("{} vs {}", event.participant_a(), event.participant_b()),
            starts: event.start_time().format("%a %d %b %H:%M").to_string(),
            odds_a: record.odds().odds_a().to_string(),
            odds_b: record.odds().odds_b().to_string(),
        }
    }
}

/// Execute the run command.
pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&cli.config)?;
    config
        .logging
        .override_with(args.log_level.as_deref(), args.json_logs);
    config.init_logging();

    info!(
        source = config.source.kind(),
        page_size = config.sync.page_size,
        pages = args.pages,
        "oddsync starting"
    );

    let (handle, task) = bootstrap::build_orchestrator(&config).spawn();

    let result = tokio::select! {
        result = session(&handle, args.pages) => result,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
        _ = stop_after(args.duration) => {
            info!("Run duration elapsed");
            Ok(())
        }
    };

    // Flush a checkpoint before the task exits.
    handle.suspend()?;
    handle.shutdown()?;
    if let Err(err) = task.await {
        warn!(error = %err, "Orchestrator task ended abnormally");
    }

    info!("oddsync stopped");
    result
}

async fn stop_after(duration: Option<u64>) {
    match duration {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => std::future::pending().await,
    }
}

async fn session(handle: &SyncHandle, pages: usize) -> Result<()> {
    load_pages(handle, pages).await?;
    print_window(handle);
    follow(handle, handle.subscribe()).await
}

/// Request up to `pages` pages, stopping early once the data is exhausted.
async fn load_pages(handle: &SyncHandle, pages: usize) -> Result<()> {
    handle.load_next_page()?;
    let state = handle
        .wait_for_state(|state| state.is_loaded() || state.is_failed())
        .await?;
    if let LoadState::Failed { message } = state {
        return Err(Error::LoadFailed(message));
    }

    for _ in 1..pages {
        if handle.is_exhausted() {
            output::note("No more pages");
            break;
        }
        let mut events = handle.subscribe();
        handle.load_next_page()?;
        wait_for_window_change(&mut events).await?;
    }
    Ok(())
}

async fn wait_for_window_change(events: &mut broadcast::Receiver<FeedEvent>) -> Result<()> {
    loop {
        match events.recv().await {
            Ok(FeedEvent::PageAppended { .. } | FeedEvent::WindowReplaced { .. }) => return Ok(()),
            Ok(FeedEvent::OddsChanged { .. }) => {}
            // Lagging may have skipped the append; the window is re-read anyway.
            Err(RecvError::Lagged(_)) => return Ok(()),
            Err(RecvError::Closed) => return Err(Error::Closed),
        }
    }
}

fn print_window(handle: &SyncHandle) {
    let records = handle.visible_records();
    output::section(&format!(
        "Upcoming matches ({} of {})",
        records.len(),
        handle.feed().len()
    ));
    if records.is_empty() {
        output::warn("No upcoming matches");
        return;
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .enumerate()
        .map(|(index, record)| RecordRow::new(index + 1, record))
        .collect();
    output::block(&Table::new(rows).to_string());
    if handle.is_exhausted() {
        output::note("  End of feed");
    }
    println!();
}

/// Print odds updates until the feed closes.
async fn follow(handle: &SyncHandle, mut events: broadcast::Receiver<FeedEvent>) -> Result<()> {
    output::note("Following odds updates (Ctrl-C to stop)");
    loop {
        match events.recv().await {
            Ok(FeedEvent::OddsChanged { ids }) => report_changes(handle, &ids),
            Ok(FeedEvent::WindowReplaced { ids }) => {
                info!(visible = ids.len(), "Feed refreshed");
                print_window(handle);
            }
            Ok(FeedEvent::PageAppended { ids }) => {
                info!(appended = ids.len(), "Page appended");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Update stream lagged");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}

fn report_changes(handle: &SyncHandle, ids: &[EventId]) {
    let timestamp = Utc::now().format("%H:%M:%S").to_string();
    for id in ids {
        let Some(record) = handle.record(*id) else {
            continue;
        };
        let event = record.event();
        info!(
            event = %id,
            odds_a = %record.odds().odds_a(),
            odds_b = %record.odds().odds_b(),
            "Odds changed"
        );
        output::update(
            &timestamp,
            "odds",
            &format!(
                "{} vs {}  {} / {}",
                event.participant_a(),
                event.participant_b(),
                record.odds().odds_a(),
                record.odds().odds_b()
            ),
        );
    }
}
