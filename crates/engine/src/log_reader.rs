// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading back the primary log

use sdlog_adapters::{Storage, StorageError};
use sdlog_core::Record;
use std::io::Read;

/// Parsed contents of the primary log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogScan {
    pub records: Vec<Record>,
    /// Lines that did not parse as a record
    pub malformed: usize,
}

impl LogScan {
    pub fn last_sequence(&self) -> Option<u64> {
        self.records.iter().map(|r| r.sequence).max()
    }
}

/// Read and parse every record in the primary log
///
/// A missing file is an empty log. Malformed lines (for example a partial
/// last line after power loss) are counted and skipped.
pub fn read_primary_log<S: Storage>(storage: &S, name: &str) -> Result<LogScan, StorageError> {
    let mut reader = match storage.open_read(name) {
        Ok(reader) => reader,
        Err(StorageError::NotFound(_)) => return Ok(LogScan::default()),
        Err(e) => return Err(e),
    };
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut scan = LogScan::default();
    for line in bytes.split(|b| *b == b'\n') {
        let line = String::from_utf8_lossy(line);
        if line.trim().is_empty() {
            continue;
        }
        match Record::parse_line(&line) {
            Some(record) => scan.records.push(record),
            None => scan.malformed += 1,
        }
    }
    Ok(scan)
}

#[cfg(test)]
#[path = "log_reader_tests.rs"]
mod tests;
