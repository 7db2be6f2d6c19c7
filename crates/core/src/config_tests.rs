// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn empty_document_yields_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.schedule.probe_interval, Duration::from_secs(5));
    assert_eq!(config.schedule.suspend_interval, Duration::from_secs(60));
    assert_eq!(config.schedule.suspend_grace, Duration::from_secs(2));
    assert_eq!(config.schedule.backup_interval, Duration::from_secs(3600));
    assert_eq!(config.buffer.limit(), BufferLimit::records(10));
    assert_eq!(config.retention.max_backups, 5);
    assert!(config.clock.resume_sequence);
}

#[test]
fn full_document_parses() {
    let config = Config::parse(
        r#"
[storage]
root = "/tmp/card"
primary_log = "log.txt"
backup_prefix = "snap"
create_root = true

[schedule]
probe_interval = "2s"
tick_interval = "250ms"
suspend_interval = "5m"
suspend_grace = "10s"
backup_interval = "30m"

[buffer]
threshold = 256
unit = "bytes"

[retention]
max_backups = 3

[clock]
source = "ticks"
resume_sequence = false

[log]
level = "debug"
file = "/tmp/sdlogd.log"
"#,
    )
    .unwrap();

    assert_eq!(config.storage.root, PathBuf::from("/tmp/card"));
    assert_eq!(config.storage.backup_prefix, "snap");
    assert!(config.storage.create_root);
    assert_eq!(config.schedule.tick_interval, Duration::from_millis(250));
    assert_eq!(config.schedule.suspend_interval, Duration::from_secs(300));
    assert_eq!(config.buffer.limit(), BufferLimit::bytes(256));
    assert_eq!(config.retention.max_backups, 3);
    assert_eq!(config.clock.source, ClockSource::Ticks);
    assert!(!config.clock.resume_sequence);
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.fault_led, None);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Config::parse("[buffer]\nthresold = 4\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[parameterized(
    zero_probe = { "[schedule]\nprobe_interval = \"0s\"" },
    zero_grace = { "[schedule]\nsuspend_grace = \"0s\"" },
    zero_threshold = { "[buffer]\nthreshold = 0" },
    empty_log_name = { "[storage]\nprimary_log = \"\"" },
    nested_log_name = { "[storage]\nprimary_log = \"logs/data.txt\"" },
    prefix_shadows_log = { "[storage]\nprimary_log = \"backup.txt\"" },
    empty_prefix = { "[storage]\nbackup_prefix = \"\"" },
)]
fn invalid_values_are_rejected(doc: &str) {
    let err = Config::parse(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {:?}", err);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sdlog.toml");
    std::fs::write(&path, "[retention]\nmax_backups = 9\n").unwrap();
    assert_eq!(Config::load(&path).unwrap().retention.max_backups, 9);
}
