//! Integration tests for sequential ingestion against a scripted provider.

mod common;

use common::{bars, date, days, RecordingProgress, Reply, ScriptedProvider};
use pricelab_core::data::{fetch_and_save, DataError, RawStore, TracingProgress};
use std::fs;

#[test]
fn provider_error_does_not_stop_later_symbols() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path().join("raw"));
    let provider = ScriptedProvider::new()
        .reply("TSLA", Reply::Fail("connection reset".into()))
        .reply("SPY", Reply::Bars(bars(&days("2024-01-02", 3), &[1.0, 2.0, 3.0], true)));
    let progress = RecordingProgress::default();

    let summary = fetch_and_save(
        &provider,
        &store,
        &["TSLA", "SPY"],
        date("2024-01-01"),
        date("2024-02-01"),
        &progress,
    );

    assert_eq!(provider.calls(), vec!["TSLA", "SPY"]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "TSLA");
    assert!(matches!(summary.failed[0].1, DataError::NetworkUnreachable(_)));
    assert_eq!(summary.saved.len(), 1);
    assert!(store.raw_path("SPY").exists());
    assert!(!store.raw_path("TSLA").exists());
    assert_eq!(
        progress.events(),
        vec!["start:TSLA", "error:TSLA", "start:SPY", "saved:SPY", "done:2"]
    );
}

#[test]
fn every_symbol_is_attempted_even_when_all_fail() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path());
    let provider = ScriptedProvider::new();

    let summary = fetch_and_save(
        &provider,
        &store,
        &["A", "B", "C"],
        date("2024-01-01"),
        date("2024-02-01"),
        &TracingProgress,
    );

    assert_eq!(provider.calls(), vec!["A", "B", "C"]);
    assert_eq!(summary.failed.len(), 3);
    assert!(!summary.all_saved());
}

#[test]
fn empty_result_leaves_prior_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path());
    store.write("BND", &bars(&days("2023-01-02", 2), &[70.0, 71.0], true)).unwrap();
    let before = fs::read_to_string(store.raw_path("BND")).unwrap();

    let provider = ScriptedProvider::new().reply("BND", Reply::Empty);
    let summary = fetch_and_save(
        &provider,
        &store,
        &["BND"],
        date("2024-01-01"),
        date("2024-02-01"),
        &TracingProgress,
    );

    assert_eq!(summary.empty, vec!["BND"]);
    assert_eq!(fs::read_to_string(store.raw_path("BND")).unwrap(), before);
}

#[test]
fn rerun_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path());
    store.write("SPY", &bars(&days("2023-01-02", 5), &[1.0; 5], true)).unwrap();

    let provider = ScriptedProvider::new()
        .reply("SPY", Reply::Bars(bars(&days("2024-01-02", 2), &[5.0, 6.0], true)));
    fetch_and_save(
        &provider,
        &store,
        &["SPY"],
        date("2024-01-01"),
        date("2024-02-01"),
        &TracingProgress,
    );

    let frame = store.read("SPY").unwrap();
    assert_eq!(frame.dates, days("2024-01-02", 2));
}

#[test]
fn creates_missing_directory_and_lowercases_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let raw_dir = dir.path().join("data").join("raw");
    let store = RawStore::new(&raw_dir);
    let provider = ScriptedProvider::new()
        .reply("TSLA", Reply::Bars(bars(&days("2024-01-02", 1), &[250.0], true)));

    let summary = fetch_and_save(
        &provider,
        &store,
        &["TSLA"],
        date("2024-01-01"),
        date("2024-02-01"),
        &TracingProgress,
    );

    assert!(raw_dir.is_dir());
    assert_eq!(summary.saved[0].1, raw_dir.join("tsla_raw.csv"));
    let content = fs::read_to_string(raw_dir.join("tsla_raw.csv")).unwrap();
    assert!(content.starts_with("Date,Open,High,Low,Close,Adj Close,Volume\n2024-01-02,"));
}

#[test]
fn inverted_range_attempts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path().join("raw"));
    let provider = ScriptedProvider::new();

    let summary = fetch_and_save(
        &provider,
        &store,
        &["SPY"],
        date("2024-02-01"),
        date("2024-01-01"),
        &TracingProgress,
    );

    assert!(provider.calls().is_empty());
    assert_eq!(summary.total(), 0);
    assert!(!dir.path().join("raw").exists());
}

#[test]
fn write_failure_is_recorded_and_later_symbols_still_saved() {
    let dir = tempfile::tempdir().unwrap();
    let store = RawStore::new(dir.path());
    // A directory where A's file belongs makes the final rename fail
    fs::create_dir(store.raw_path("A")).unwrap();

    let provider = ScriptedProvider::new()
        .reply("A", Reply::Bars(bars(&days("2024-01-02", 2), &[1.0, 2.0], true)))
        .reply("B", Reply::Bars(bars(&days("2024-01-02", 2), &[3.0, 4.0], true)));
    let progress = RecordingProgress::default();

    let summary = fetch_and_save(
        &provider,
        &store,
        &["A", "B"],
        date("2024-01-01"),
        date("2024-02-01"),
        &progress,
    );

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "A");
    assert!(matches!(summary.failed[0].1, DataError::Io { .. }));
    assert_eq!(summary.saved.len(), 1);
    assert!(store.raw_path("B").is_file());
    assert!(!store.raw_path("A").with_extension("csv.tmp").exists());
    assert_eq!(
        progress.events(),
        vec!["start:A", "error:A", "start:B", "saved:B", "done:2"]
    );
}

#[test]
fn unusable_raw_dir_attempts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("raw");
    fs::write(&not_a_dir, "occupied").unwrap();
    let store = RawStore::new(&not_a_dir);
    let provider = ScriptedProvider::new()
        .reply("SPY", Reply::Bars(bars(&days("2024-01-02", 1), &[1.0], true)));
    let progress = RecordingProgress::default();

    let summary = fetch_and_save(
        &provider,
        &store,
        &["SPY"],
        date("2024-01-01"),
        date("2024-02-01"),
        &progress,
    );

    assert!(provider.calls().is_empty());
    assert_eq!(summary.total(), 0);
    assert_eq!(progress.events(), vec!["done:0"]);
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "occupied");
}
