// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State shared by every scheduled task
//!
//! Timer callbacks may interleave, so the boolean gates are atomics and the
//! log buffer sits behind a mutex. The sequence counter is only advanced while
//! that mutex is held, which keeps buffer order and sequence order identical.

use crate::record::{LogBuffer, Record};
use crate::timestamp::Timestamp;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Tracked up/down status of the storage device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
    Available,
    Unavailable,
}

impl AvailabilityState {
    pub fn from_available(available: bool) -> Self {
        if available {
            AvailabilityState::Available
        } else {
            AvailabilityState::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == AvailabilityState::Available
    }
}

/// Point-in-time view of the shared state for status reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub available: bool,
    pub write_enabled: bool,
    pub suspended: bool,
    pub fault: bool,
    pub sequence: u64,
    pub buffered_records: usize,
    pub buffered_bytes: usize,
}

/// Shared gates, counter and buffer
#[derive(Debug)]
pub struct SharedState {
    available: AtomicBool,
    write_enabled: AtomicBool,
    suspended: AtomicBool,
    /// Last value pushed to the fault indicator
    fault: AtomicBool,
    /// Cleared until the counter has been resumed from the primary log
    sequence_ready: AtomicBool,
    sequence: AtomicU64,
    buffer: Mutex<LogBuffer>,
}

impl SharedState {
    /// Fresh state at boot: storage unknown (unavailable), writes enabled
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(false),
            write_enabled: AtomicBool::new(true),
            suspended: AtomicBool::new(false),
            fault: AtomicBool::new(false),
            sequence_ready: AtomicBool::new(true),
            sequence: AtomicU64::new(0),
            buffer: Mutex::new(LogBuffer::new()),
        }
    }

    pub fn availability(&self) -> AvailabilityState {
        AvailabilityState::from_available(self.is_available())
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Set availability, returning the previous value
    pub fn set_available(&self, available: bool) -> bool {
        self.available.swap(available, Ordering::SeqCst)
    }

    pub fn is_write_enabled(&self) -> bool {
        self.write_enabled.load(Ordering::SeqCst)
    }

    pub fn set_write_enabled(&self, enabled: bool) {
        self.write_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.suspended.store(suspended, Ordering::SeqCst);
    }

    /// Whether the indicator should currently be lit
    pub fn fault_wanted(&self) -> bool {
        !self.is_available() || self.is_suspended()
    }

    /// Returns the indicator value to publish if it changed since the last call
    pub fn take_fault_change(&self) -> Option<bool> {
        let wanted = self.fault_wanted();
        let previous = self.fault.swap(wanted, Ordering::SeqCst);
        (previous != wanted).then_some(wanted)
    }

    /// Record that publishing `on` did not reach the indicator, so the next
    /// `take_fault_change` reports it again
    pub fn fault_publish_failed(&self, on: bool) {
        let _ = self
            .fault
            .compare_exchange(on, !on, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Whether new records may be numbered yet
    pub fn is_sequence_ready(&self) -> bool {
        self.sequence_ready.load(Ordering::SeqCst)
    }

    pub fn set_sequence_ready(&self, ready: bool) {
        self.sequence_ready.store(ready, Ordering::SeqCst);
    }

    /// Last sequence number handed out (0 before the first record)
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Continue numbering after `last`; never moves the counter backwards
    pub fn resume_sequence_after(&self, last: u64) {
        self.sequence.fetch_max(last, Ordering::SeqCst);
    }

    /// Lock the buffer for a read-modify-write
    pub fn buffer(&self) -> MutexGuard<'_, LogBuffer> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number the next record and append it to a buffer the caller has locked
    pub fn append_record(&self, buffer: &mut LogBuffer, timestamp: Timestamp) -> Record {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let record = Record::new(timestamp, sequence);
        buffer.push(&record);
        record
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let buffer = self.buffer();
        StateSnapshot {
            available: self.is_available(),
            write_enabled: self.is_write_enabled(),
            suspended: self.is_suspended(),
            fault: self.fault.load(Ordering::SeqCst),
            sequence: self.sequence(),
            buffered_records: buffer.record_count(),
            buffered_bytes: buffer.len_bytes(),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
