//! End-to-end feed flows over the JSON file store.

mod support;

use std::sync::Arc;

use oddsync::adapter::outbound::JsonFileStore;
use oddsync::application::FeedEvent;
use oddsync::domain::{EventId, LoadState};
use oddsync::port::SnapshotStore;
use oddsync::testkit::config;
use oddsync::testkit::domain::{ids, quote, record_at, records};
use oddsync::testkit::source::ScriptedSource;
use rust_decimal_macros::dec;
use support::{eventually, recv, start_with_file, wait_for};
use tempfile::TempDir;

fn snapshot_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("cached_events.json")
}

#[tokio::test]
async fn test_checkpoint_survives_restart_as_warm_start() {
    let dir = TempDir::new().unwrap();
    let path = snapshot_path(&dir);

    let first = records(5, 1);
    let run = start_with_file(
        Arc::new(ScriptedSource::from_records(&first)),
        &path,
        config::sync(40),
    );
    run.handle.load_next_page().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;
    run.stop().await;

    let saved = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(ids(&saved), ids(&first));

    let fresh = records(3, 100);
    let run = start_with_file(
        Arc::new(ScriptedSource::from_records(&fresh)),
        &path,
        config::sync(40),
    );
    let mut rx = run.handle.subscribe();
    run.handle.load_next_page().unwrap();

    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::WindowReplaced { ids: ids(&first) }
    );
    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::WindowReplaced { ids: ids(&fresh) }
    );
    assert_eq!(run.source.event_calls(), 1);
    run.stop().await;

    let saved = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(ids(&saved), ids(&fresh));
}

#[tokio::test]
async fn test_past_snapshot_is_removed_before_fetching() {
    let dir = TempDir::new().unwrap();
    let path = snapshot_path(&dir);
    JsonFileStore::new(&path)
        .save(&[record_at(1, -7200), record_at(2, -60)])
        .await
        .unwrap();

    let data = records(4, 10);
    let run = start_with_file(
        Arc::new(ScriptedSource::from_records(&data)),
        &path,
        config::sync(40),
    );
    run.handle.load_next_page().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;

    assert_eq!(run.handle.visible_window(), ids(&data));
    assert!(!path.exists());
    run.stop().await;
}

#[tokio::test]
async fn test_partially_stale_snapshot_keeps_upcoming_records() {
    let dir = TempDir::new().unwrap();
    let path = snapshot_path(&dir);
    JsonFileStore::new(&path)
        .save(&[record_at(1, -600), record_at(2, 600), record_at(3, 1200)])
        .await
        .unwrap();

    let source = ScriptedSource::from_records(&records(2, 2));
    let gate = source.hold_next_fetch();
    let run = start_with_file(Arc::new(source), &path, config::sync(40));
    run.handle.load_next_page().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;

    assert_eq!(
        run.handle.visible_window(),
        vec![EventId::new(2), EventId::new(3)]
    );
    gate.notify_one();
    run.stop().await;
}

#[tokio::test]
async fn test_paging_and_live_odds_over_file_store() {
    let dir = TempDir::new().unwrap();
    let data = records(25, 1);
    let run = start_with_file(
        Arc::new(ScriptedSource::from_records(&data)),
        &snapshot_path(&dir),
        config::sync(10),
    );
    let mut rx = run.handle.subscribe();

    run.handle.load_next_page().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;
    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::WindowReplaced {
            ids: ids(&data[..10])
        }
    );

    run.handle.load_next_page().unwrap();
    run.handle.load_next_page().unwrap();
    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::PageAppended {
            ids: ids(&data[10..20])
        }
    );
    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::PageAppended {
            ids: ids(&data[20..])
        }
    );
    assert!(run.handle.is_exhausted());

    // Quotes for unknown ids are dropped; known ids change in place.
    run.stream.send_batch(vec![
        quote(3, dec!(4.20), dec!(1.25)),
        quote(999, dec!(2.00), dec!(2.00)),
    ]);
    assert_eq!(
        recv(&mut rx).await,
        FeedEvent::OddsChanged {
            ids: vec![EventId::new(3)]
        }
    );
    let record = run.handle.record(EventId::new(3)).unwrap();
    assert_eq!(record.odds().odds_a(), dec!(4.20));
    assert!(run.handle.record(EventId::new(999)).is_none());
    assert_eq!(run.handle.visible_window(), ids(&data));

    run.stop().await;
    let saved = JsonFileStore::new(snapshot_path(&dir)).load().await.unwrap();
    let saved_three = saved.iter().find(|r| r.id() == EventId::new(3)).unwrap();
    assert_eq!(saved_three.odds().odds_b(), dec!(1.25));
}

#[tokio::test]
async fn test_retry_resets_source_and_reloads() {
    let dir = TempDir::new().unwrap();
    let path = snapshot_path(&dir);
    let source = Arc::new(ScriptedSource::from_records(&records(3, 1)).failing_odds(5));
    let run = start_with_file(Arc::clone(&source), &path, config::sync(40));

    run.handle.load_next_page().unwrap();
    let state = wait_for(&run.handle, LoadState::is_failed).await;
    match state {
        LoadState::Failed { message } => assert!(message.contains("5 attempts")),
        other => panic!("unexpected state {other}"),
    }
    assert!(run.handle.records().is_empty());

    let fresh = records(6, 50);
    source.set_records(&fresh);
    run.handle.retry().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;

    assert_eq!(run.handle.visible_window(), ids(&fresh));
    assert_eq!(source.reset_calls(), 1);
    assert!(!run.stream.subscribed_ids().is_empty());
    run.stop().await;
}

#[tokio::test]
async fn test_suspend_then_resume_resubscribes_loaded_ids() {
    let dir = TempDir::new().unwrap();
    let data = records(4, 1);
    let run = start_with_file(
        Arc::new(ScriptedSource::from_records(&data)),
        &snapshot_path(&dir),
        config::sync(2),
    );
    run.handle.load_next_page().unwrap();
    wait_for(&run.handle, LoadState::is_loaded).await;
    assert_eq!(run.stream.subscribed_ids(), ids(&data));

    run.handle.suspend().unwrap();
    let stream = run.stream.clone();
    eventually(|| !stream.is_connected()).await;
    eventually(|| snapshot_path(&dir).exists()).await;

    run.handle.resume().unwrap();
    eventually(|| stream.is_connected()).await;
    assert_eq!(stream.subscribed_ids(), ids(&data));
    assert_eq!(run.handle.load_state(), LoadState::Loaded);

    run.stop().await;
}
