// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! `sdlogd --check` against config files

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn sdlogd() -> Command {
    Command::cargo_bin("sdlogd").unwrap()
}

#[test]
fn check_with_defaults_prints_settings() {
    sdlogd()
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("primary log:      datalog.txt"))
        .stdout(predicate::str::contains("keep 5"));
}

#[test]
fn check_reads_durations_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sdlog.toml");
    std::fs::write(
        &path,
        r#"
[storage]
root = "/tmp/card"
backup_prefix = "snap"

[schedule]
suspend_grace = "5s"
backup_interval = "30m"

[retention]
max_backups = 3
"#,
    )
    .unwrap();

    sdlogd()
        .args(["--check", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("snap_<stamp>.txt, keep 3"))
        .stdout(predicate::str::contains("suspend grace:    5s"))
        .stdout(predicate::str::contains("backup every:     30m"));
}

#[test]
fn check_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sdlog.toml");
    std::fs::write(&path, "[schedule]\ntick_interval = \"0s\"\n").unwrap();

    sdlogd()
        .args(["--check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_interval must be non-zero"));
}

#[test]
fn check_rejects_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sdlog.toml");
    std::fs::write(&path, "[buffer]\nsize = 10\n").unwrap();

    sdlogd()
        .args(["--check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();

    sdlogd()
        .args(["--check", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure();
}
