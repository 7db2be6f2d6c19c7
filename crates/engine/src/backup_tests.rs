// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{with_tracing, Harness, PREFIX, PRIMARY};
use chrono::NaiveDate;
use sdlog_adapters::{FakeStorage, StorageCall};
use sdlog_core::FakeClock;
use std::time::Duration;

fn engine(h: &Harness, max_backups: u32) -> BackupEngine<FakeStorage, FakeClock> {
    BackupEngine::new(
        Arc::clone(&h.state),
        h.storage.clone(),
        h.clock.clone(),
        PRIMARY,
        PREFIX,
        max_backups,
    )
}

#[test]
fn copies_primary_log_byte_for_byte() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "5, 1\n10, 2\n");
    h.clock.advance(Duration::from_millis(42));
    let mut engine = engine(&h, 5);

    let report = engine.create_backup().unwrap();

    assert_eq!(report.file_name, "backup_42.txt");
    assert_eq!(report.bytes, 11);
    assert_eq!(h.storage.contents("backup_42.txt").unwrap(), "5, 1\n10, 2\n");
    assert_eq!(report.retention.unwrap().remaining, 1);
}

#[test]
fn wall_clock_stamp_is_rendered_as_digits() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "");
    let wall = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 0, 5)
        .unwrap();
    h.clock.set_wall(wall);
    let mut engine = engine(&h, 5);

    let report = engine.create_backup().unwrap();

    assert_eq!(report.file_name, "backup_20261016120005.txt");
}

#[test]
fn skipped_while_storage_unavailable() {
    let h = Harness::new();
    h.state.set_available(false);
    let mut engine = engine(&h, 5);

    assert!(matches!(
        engine.create_backup(),
        Err(BackupError::StorageUnavailable)
    ));
    assert!(h.storage.calls().is_empty());
}

#[test]
fn missing_primary_log_aborts_without_retention() {
    let h = Harness::new();
    for stamp in [1, 2, 3] {
        h.storage.put(&BackupEntry::file_name_for(PREFIX, stamp), "");
    }
    let mut engine = engine(&h, 1);

    let (logs, result) = with_tracing(|| engine.create_backup());

    assert!(matches!(result, Err(BackupError::OpenFailed { ref name, .. }) if name == PRIMARY));
    assert!(logs.contains("failed to open primary log for backup"));
    assert!(!h
        .storage
        .calls()
        .iter()
        .any(|c| matches!(c, StorageCall::Remove { .. } | StorageCall::OpenWrite { .. })));
}

#[test]
fn destination_open_failure_aborts() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "1\n");
    h.storage.fail_open("backup_0.txt");
    let mut engine = engine(&h, 5);

    let result = engine.create_backup();

    assert!(
        matches!(result, Err(BackupError::OpenFailed { ref name, .. }) if name == "backup_0.txt")
    );
}

#[test]
fn copy_failure_removes_partial_backup() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "0, 1\n");
    h.storage.set_write_fails(true);
    let mut engine = engine(&h, 5);

    let result = engine.create_backup();

    assert!(matches!(result, Err(BackupError::CopyFailed { .. })));
    assert_eq!(h.storage.file_names(), vec![PRIMARY]);
}

#[test]
fn invokes_retention_after_copy() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "x\n");
    for stamp in [100, 200, 300] {
        h.storage.put(&BackupEntry::file_name_for(PREFIX, stamp), "");
    }
    let mut engine = engine(&h, 3);

    let report = engine.create_backup().unwrap();

    // New backup is bumped above the existing ones, so 100 is the oldest
    assert_eq!(report.file_name, "backup_301.txt");
    assert_eq!(report.retention.unwrap().deleted, vec!["backup_100.txt"]);
}

#[test]
fn retention_failure_does_not_fail_backup() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "x\n");
    h.storage.put("backup_1.txt", "");
    h.storage.fail_remove("backup_1.txt");
    h.clock.advance(Duration::from_millis(10));
    let mut engine = engine(&h, 1);

    let report = engine.create_backup().unwrap();

    assert_eq!(report.file_name, "backup_10.txt");
    assert!(matches!(
        report.retention,
        Err(RetentionError::DeletionFailed { .. })
    ));
}

#[test]
fn stamps_strictly_increase_within_one_clock_reading() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "");
    let mut engine = engine(&h, 10);

    let names: Vec<String> = (0..3)
        .map(|_| engine.create_backup().unwrap().file_name)
        .collect();

    assert_eq!(names, vec!["backup_0.txt", "backup_1.txt", "backup_2.txt"]);
}

#[test]
fn stamps_continue_above_backups_from_before_restart() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "");
    h.storage.put("backup_5000.txt", "");
    h.clock.advance(Duration::from_millis(20));
    let mut engine = engine(&h, 10);

    let report = engine.create_backup().unwrap();

    assert_eq!(report.file_name, "backup_5001.txt");
}

#[test]
fn logs_created_backup() {
    let h = Harness::new();
    h.storage.put(PRIMARY, "abc");
    let mut engine = engine(&h, 5);

    let (logs, _) = with_tracing(|| engine.create_backup());

    assert!(logs.contains("backup created"));
    assert!(logs.contains("backup_0.txt"));
}
