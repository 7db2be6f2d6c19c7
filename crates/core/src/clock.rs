// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The clock supplies two readings: a monotonic `Instant` that drives the
//! scheduler, and a `Timestamp` that is written into records and backup names.

use crate::timestamp::Timestamp;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, Timelike};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    /// Monotonic time for scheduling
    fn now(&self) -> Instant;

    /// Timestamp for records and backup names
    fn timestamp(&self) -> Timestamp;
}

/// Real-time clock backed by the system's local time
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::Wall(whole_seconds(Local::now().naive_local()))
    }
}

/// Fallback clock for boards without an RTC
///
/// Timestamps are milliseconds elapsed since the clock was created.
#[derive(Clone)]
pub struct TickClock {
    origin: Instant,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::Ticks(millis(self.origin.elapsed()))
    }
}

struct FakeTime {
    origin: Instant,
    current: Instant,
    wall_origin: Option<NaiveDateTime>,
}

/// Fake clock for testing with controllable time
///
/// Produces tick timestamps (milliseconds since creation) until a wall time
/// is set with [`FakeClock::set_wall`].
#[derive(Clone)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            time: Arc::new(Mutex::new(FakeTime {
                origin: now,
                current: now,
                wall_origin: None,
            })),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        time.current += duration;
    }

    /// Switch to wall-clock timestamps, reading `wall` at the current instant
    pub fn set_wall(&self, wall: NaiveDateTime) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        let elapsed = time.current.duration_since(time.origin);
        let elapsed = ChronoDuration::from_std(elapsed).unwrap_or(ChronoDuration::zero());
        time.wall_origin = Some(wall - elapsed);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().unwrap_or_else(|e| e.into_inner()).current
    }

    fn timestamp(&self) -> Timestamp {
        let time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        let elapsed = time.current.duration_since(time.origin);
        match time.wall_origin {
            Some(origin) => {
                let elapsed = ChronoDuration::from_std(elapsed).unwrap_or(ChronoDuration::zero());
                Timestamp::Wall(whole_seconds(origin + elapsed))
            }
            None => Timestamp::Ticks(millis(elapsed)),
        }
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn whole_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
