// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn led_writes_brightness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brightness");
    let led = LedFault::new(&path);

    assert!(led.set_fault(true));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");

    assert!(led.set_fault(false));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
}

#[test]
fn led_write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let led = LedFault::new(dir.path().join("missing").join("brightness"));
    assert!(!led.set_fault(true));
    assert_eq!(led.path(), dir.path().join("missing").join("brightness"));
}
