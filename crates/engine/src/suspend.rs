// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance window: suspend writes, flush, resume after a grace period
//!
//! Two states, WRITING and SUSPENDED. A suspend trigger while already
//! SUSPENDED is rejected rather than coalesced, so the pending resume keeps
//! its first deadline.

use crate::monitor::publish_fault;
use crate::writer::PersistentWriter;
use sdlog_adapters::{FaultIndicator, Storage};
use sdlog_core::SharedState;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Suspend state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuspendState {
    #[default]
    Writing,
    Suspended,
}

impl fmt::Display for SuspendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuspendState::Writing => write!(f, "writing"),
            SuspendState::Suspended => write!(f, "suspended"),
        }
    }
}

/// Result of a suspend trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendOutcome {
    /// Writes suspended; the caller arms a one-shot resume after this delay
    Suspended { resume_after: Duration },
    /// Trigger ignored, a resume is already pending
    AlreadySuspended,
}

pub struct SuspendController<S, F> {
    state: Arc<SharedState>,
    writer: PersistentWriter<S, F>,
    fault: F,
    grace: Duration,
    phase: SuspendState,
}

impl<S: Storage, F: FaultIndicator> SuspendController<S, F> {
    pub fn new(
        state: Arc<SharedState>,
        writer: PersistentWriter<S, F>,
        fault: F,
        grace: Duration,
    ) -> Self {
        Self {
            state,
            writer,
            fault,
            grace,
            phase: SuspendState::Writing,
        }
    }

    pub fn phase(&self) -> SuspendState {
        self.phase
    }

    pub fn suspend(&mut self) -> SuspendOutcome {
        if self.phase == SuspendState::Suspended {
            tracing::warn!("suspend requested while already suspended, ignoring");
            return SuspendOutcome::AlreadySuspended;
        }

        self.state.set_write_enabled(false);
        self.state.set_suspended(true);
        publish_fault(&self.state, &self.fault);
        tracing::info!(grace = ?self.grace, "writes suspended");

        // Best effort; the buffer survives a failure and is flushed after resume
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "flush before suspend failed");
        }

        self.phase = SuspendState::Suspended;
        SuspendOutcome::Suspended {
            resume_after: self.grace,
        }
    }

    /// Re-enable writes; returns false if nothing was suspended
    pub fn resume(&mut self) -> bool {
        if self.phase != SuspendState::Suspended {
            tracing::warn!("resume requested while writing, ignoring");
            return false;
        }

        self.state.set_suspended(false);
        publish_fault(&self.state, &self.fault);
        self.state.set_write_enabled(true);
        self.phase = SuspendState::Writing;
        tracing::info!("writes resumed");
        true
    }
}

#[cfg(test)]
#[path = "suspend_tests.rs"]
mod tests;
