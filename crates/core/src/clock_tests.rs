// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn system_clock_produces_wall_timestamps() {
    assert!(SystemClock.timestamp().is_wall());
}

#[test]
fn tick_clock_counts_up() {
    let clock = TickClock::new();
    let first = clock.timestamp().stamp();
    std::thread::sleep(Duration::from_millis(5));
    let second = clock.timestamp().stamp();
    assert!(second >= first + 5);
    assert!(!clock.timestamp().is_wall());
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[test]
fn fake_clock_ticks_follow_advances() {
    let clock = FakeClock::new();
    assert_eq!(clock.timestamp(), Timestamp::Ticks(0));
    clock.advance(Duration::from_millis(1500));
    assert_eq!(clock.timestamp(), Timestamp::Ticks(1500));
}

#[test]
fn fake_clock_wall_time_advances_from_set_point() {
    let clock = FakeClock::new();
    clock.advance(Duration::from_secs(10));
    let wall = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    clock.set_wall(wall);
    assert_eq!(clock.timestamp().to_string(), "2026-10-16 08:00:00");

    clock.advance(Duration::from_secs(61));
    assert_eq!(clock.timestamp().to_string(), "2026-10-16 08:01:01");
}
