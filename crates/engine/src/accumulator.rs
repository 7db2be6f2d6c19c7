// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffer accumulator: one record per tick, flush at the threshold

use crate::writer::PersistentWriter;
use sdlog_adapters::{FaultIndicator, Storage};
use sdlog_core::{BufferLimit, Clock, SharedState};
use std::sync::Arc;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing buffered: writes suspended, storage unavailable, sequence
    /// not yet recovered, or a full buffer that still could not be flushed
    Skipped,
    /// Record buffered, threshold not reached
    Buffered(u64),
    /// Record buffered and the buffer flushed
    Flushed(u64),
    /// Record buffered, flush attempted and failed; buffer kept
    Retained(u64),
}

/// Appends one record per tick to the shared buffer
pub struct BufferAccumulator<S, F, C> {
    state: Arc<SharedState>,
    clock: C,
    limit: BufferLimit,
    writer: PersistentWriter<S, F>,
}

impl<S, F, C> BufferAccumulator<S, F, C>
where
    S: Storage,
    F: FaultIndicator,
    C: Clock,
{
    pub fn new(
        state: Arc<SharedState>,
        clock: C,
        limit: BufferLimit,
        writer: PersistentWriter<S, F>,
    ) -> Self {
        Self {
            state,
            clock,
            limit,
            writer,
        }
    }

    /// Buffer one record, flushing synchronously once the limit is reached
    ///
    /// Gated ticks are backpressure, not errors, and are not reported. A
    /// buffer left full by an earlier failed flush is flushed before anything
    /// is added, so it never grows past the limit.
    pub fn tick(&self) -> Tick {
        if !self.state.is_write_enabled()
            || !self.state.is_available()
            || !self.state.is_sequence_ready()
        {
            return Tick::Skipped;
        }

        let backlog = self.limit.reached(&self.state.buffer());
        if backlog && self.writer.flush().is_err() {
            return Tick::Skipped;
        }

        let (sequence, full) = {
            let mut buffer = self.state.buffer();
            let record = self.state.append_record(&mut buffer, self.clock.timestamp());
            (record.sequence, self.limit.reached(&buffer))
        };
        tracing::debug!(sequence, "buffered record");

        if !full {
            return Tick::Buffered(sequence);
        }
        match self.writer.flush() {
            Ok(_) => Tick::Flushed(sequence),
            Err(_) => Tick::Retained(sequence),
        }
    }
}

#[cfg(test)]
#[path = "accumulator_tests.rs"]
mod tests;
