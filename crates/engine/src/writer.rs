// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent writer: flushes the log buffer to the primary log
//!
//! A flush either fully succeeds (buffer cleared) or fully fails (buffer kept
//! unchanged for the next attempt). Flushes are synchronous; there is no
//! background write queue.

use crate::error::WriteError;
use crate::monitor::publish_fault;
use sdlog_adapters::{FaultIndicator, Storage};
use sdlog_core::SharedState;
use std::io::Write;
use std::sync::Arc;

/// Summary of a successful flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flushed {
    pub records: usize,
    pub bytes: usize,
}

/// Writes buffered records to the primary log
#[derive(Clone)]
pub struct PersistentWriter<S, F> {
    state: Arc<SharedState>,
    storage: S,
    fault: F,
    primary_log: String,
}

impl<S: Storage, F: FaultIndicator> PersistentWriter<S, F> {
    pub fn new(state: Arc<SharedState>, storage: S, fault: F, primary_log: &str) -> Self {
        Self {
            state,
            storage,
            fault,
            primary_log: primary_log.to_string(),
        }
    }

    pub fn primary_log(&self) -> &str {
        &self.primary_log
    }

    /// Append the whole buffer to the primary log
    ///
    /// Storage availability is re-checked first; the shared state may be
    /// stale. An empty buffer succeeds without touching storage.
    pub fn flush(&self) -> Result<Flushed, WriteError> {
        let mut buffer = self.state.buffer();
        if buffer.is_empty() {
            return Ok(Flushed::default());
        }
        let pending = Flushed {
            records: buffer.record_count(),
            bytes: buffer.len_bytes(),
        };

        if !self.storage.is_available() {
            self.state.set_available(false);
            publish_fault(&self.state, &self.fault);
            tracing::error!(
                buffered = pending.records,
                "storage unavailable, keeping buffer for retry"
            );
            return Err(WriteError::StorageUnavailable);
        }

        let mut file = match self.storage.open_append(&self.primary_log) {
            Ok(file) => file,
            Err(source) => {
                tracing::error!(
                    file = %self.primary_log,
                    error = %source,
                    buffered = pending.records,
                    "failed to open primary log"
                );
                return Err(WriteError::OpenFailed {
                    name: self.primary_log.clone(),
                    source,
                });
            }
        };

        let written = file
            .write_all(buffer.contents().as_bytes())
            .and_then(|()| file.flush());
        drop(file);
        // A short write may already have landed part of the buffer. The retry
        // appends the whole buffer again, so those records can appear twice and
        // a cut-off line merges with the next one. The reader skips what no
        // longer parses and takes the highest sequence it finds.
        if let Err(source) = written {
            tracing::error!(
                file = %self.primary_log,
                error = %source,
                buffered = pending.records,
                "failed to write primary log"
            );
            return Err(WriteError::WriteFailed {
                name: self.primary_log.clone(),
                source,
            });
        }

        tracing::info!(
            file = %self.primary_log,
            records = pending.records,
            bytes = pending.bytes,
            content = %buffer.contents().trim_end(),
            "flushed buffer"
        );
        buffer.clear();
        Ok(pending)
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
