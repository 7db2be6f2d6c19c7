// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log records and the in-memory buffer awaiting a flush
//!
//! Each record is serialized as one line of the primary log:
//!
//! ```text
//! 2026-10-16 12:00:05, 41
//! 2026-10-16 12:00:06, 42
//! ```
//!
//! Lines without a timestamp (`42`) are accepted when reading, since boards
//! without a clock may have written them.

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// One timestamped sequence entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: Option<Timestamp>,
    pub sequence: u64,
}

impl Record {
    pub fn new(timestamp: Timestamp, sequence: u64) -> Self {
        Self {
            timestamp: Some(timestamp),
            sequence,
        }
    }

    /// Serialize to a primary-log line, including the trailing newline
    pub fn to_line(&self) -> String {
        match &self.timestamp {
            Some(ts) => format!("{}, {}\n", ts, self.sequence),
            None => format!("{}\n", self.sequence),
        }
    }

    /// Parse one primary-log line (with or without the trailing newline)
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        match line.rsplit_once(", ") {
            Some((ts, seq)) => Some(Self {
                timestamp: Some(Timestamp::parse(ts)?),
                sequence: seq.trim().parse().ok()?,
            }),
            None => Some(Self {
                timestamp: None,
                sequence: line.trim().parse().ok()?,
            }),
        }
    }
}

/// Unit in which the flush threshold is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdUnit {
    #[default]
    Records,
    Bytes,
}

/// Buffer size at which a flush is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimit {
    pub threshold: usize,
    pub unit: ThresholdUnit,
}

impl BufferLimit {
    pub fn records(threshold: usize) -> Self {
        Self {
            threshold,
            unit: ThresholdUnit::Records,
        }
    }

    pub fn bytes(threshold: usize) -> Self {
        Self {
            threshold,
            unit: ThresholdUnit::Bytes,
        }
    }

    /// True once the buffer has reached or passed the threshold
    pub fn reached(&self, buffer: &LogBuffer) -> bool {
        let size = match self.unit {
            ThresholdUnit::Records => buffer.record_count(),
            ThresholdUnit::Bytes => buffer.len_bytes(),
        };
        size >= self.threshold
    }
}

impl Default for BufferLimit {
    fn default() -> Self {
        Self::records(10)
    }
}

/// Ordered, append-only serialized records awaiting persistence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBuffer {
    contents: String,
    records: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &Record) {
        self.contents.push_str(&record.to_line());
        self.records += 1;
    }

    /// Serialized contents, exactly as they will be appended to the log
    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn len_bytes(&self) -> usize {
        self.contents.len()
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Drop everything; only called after a confirmed write
    pub fn clear(&mut self) {
        self.contents.clear();
        self.records = 0;
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
