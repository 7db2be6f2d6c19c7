// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamps attached to records and embedded in backup names
//!
//! A timestamp is either a wall-clock reading from the real-time clock or,
//! when no RTC is fitted, a monotonically increasing tick count.

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt;

/// Rendering used for wall-clock timestamps in the primary log
pub const WALL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in time as seen by the clock collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Real-time clock reading (local time, second resolution)
    Wall(NaiveDateTime),
    /// Tick count from the fallback monotonic counter
    Ticks(u64),
}

impl Timestamp {
    /// Sortable integer form used in backup file names.
    ///
    /// Wall-clock readings become `YYYYMMDDHHMMSS` read as a number, so
    /// numeric order is chronological order within one clock source.
    pub fn stamp(&self) -> u64 {
        match self {
            Timestamp::Wall(dt) => {
                let year = u64::try_from(dt.year()).unwrap_or(0);
                year * 10_000_000_000
                    + u64::from(dt.month()) * 100_000_000
                    + u64::from(dt.day()) * 1_000_000
                    + u64::from(dt.hour()) * 10_000
                    + u64::from(dt.minute()) * 100
                    + u64::from(dt.second())
            }
            Timestamp::Ticks(ticks) => *ticks,
        }
    }

    /// Parse either rendering produced by `Display`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, WALL_FORMAT) {
            return Some(Timestamp::Wall(dt));
        }
        s.parse::<u64>().ok().map(Timestamp::Ticks)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Timestamp::Wall(_))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Wall(dt) => write!(f, "{}", dt.format(WALL_FORMAT)),
            Timestamp::Ticks(ticks) => write!(f, "{}", ticks),
        }
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
