// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime that wires the components to the scheduler
//!
//! The runtime is single-threaded and owns every component. The host drives
//! it by sleeping until [`Runtime::next_deadline`] and calling
//! [`Runtime::run_due`].

use crate::accumulator::{BufferAccumulator, Tick};
use crate::backup::BackupEngine;
use crate::error::WriteError;
use crate::log_reader::read_primary_log;
use crate::monitor::AvailabilityMonitor;
use crate::scheduler::{ScheduledKind, Scheduler};
use crate::suspend::{SuspendController, SuspendOutcome, SuspendState};
use crate::writer::{Flushed, PersistentWriter};
use sdlog_adapters::{FaultIndicator, Storage};
use sdlog_core::config::ScheduleConfig;
use sdlog_core::{AvailabilityState, Clock, Config, SharedState, StateSnapshot};
use std::sync::Arc;
use std::time::Instant;

/// Runtime adapter dependencies
pub struct RuntimeDeps<S, F, C> {
    pub storage: S,
    pub fault: F,
    pub clock: C,
}

/// Status report for the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStatus {
    pub state: StateSnapshot,
    pub phase: SuspendState,
    pub next_deadline: Option<Instant>,
}

/// Runtime that coordinates the system
pub struct Runtime<S, F, C> {
    state: Arc<SharedState>,
    storage: S,
    clock: C,
    scheduler: Scheduler,
    schedule: ScheduleConfig,
    monitor: AvailabilityMonitor<S, F>,
    accumulator: BufferAccumulator<S, F, C>,
    writer: PersistentWriter<S, F>,
    suspend: SuspendController<S, F>,
    backup: BackupEngine<S, C>,
    resume_sequence: bool,
    sequence_recovered: bool,
}

impl<S, F, C> Runtime<S, F, C>
where
    S: Storage,
    F: FaultIndicator,
    C: Clock,
{
    pub fn new(config: &Config, deps: RuntimeDeps<S, F, C>) -> Self {
        let RuntimeDeps {
            storage,
            fault,
            clock,
        } = deps;
        let state = Arc::new(SharedState::new());
        // Nothing is numbered until the last sequence on the device is known
        state.set_sequence_ready(!config.clock.resume_sequence);
        let primary_log = config.storage.primary_log.as_str();

        let writer = PersistentWriter::new(
            Arc::clone(&state),
            storage.clone(),
            fault.clone(),
            primary_log,
        );

        Self {
            monitor: AvailabilityMonitor::new(Arc::clone(&state), storage.clone(), fault.clone()),
            accumulator: BufferAccumulator::new(
                Arc::clone(&state),
                clock.clone(),
                config.buffer.limit(),
                writer.clone(),
            ),
            suspend: SuspendController::new(
                Arc::clone(&state),
                writer.clone(),
                fault,
                config.schedule.suspend_grace,
            ),
            backup: BackupEngine::new(
                Arc::clone(&state),
                storage.clone(),
                clock.clone(),
                primary_log,
                &config.storage.backup_prefix,
                config.retention.max_backups,
            ),
            writer,
            state,
            storage,
            clock,
            scheduler: Scheduler::new(),
            schedule: config.schedule.clone(),
            resume_sequence: config.clock.resume_sequence,
            sequence_recovered: false,
        }
    }

    /// Probe once and arm the periodic tasks
    ///
    /// Each task first fires one interval from now.
    pub fn start(&mut self) -> AvailabilityState {
        let availability = self.probe();
        let now = self.clock.now();
        let periodic = [
            (ScheduledKind::Probe, self.schedule.probe_interval),
            (ScheduledKind::Tick, self.schedule.tick_interval),
            (ScheduledKind::Suspend, self.schedule.suspend_interval),
            (ScheduledKind::Backup, self.schedule.backup_interval),
        ];
        for (kind, interval) in periodic {
            self.scheduler
                .schedule_repeating(kind.id(), now + interval, interval, kind);
        }
        tracing::info!(
            available = availability.is_available(),
            probe = ?self.schedule.probe_interval,
            tick = ?self.schedule.tick_interval,
            suspend = ?self.schedule.suspend_interval,
            backup = ?self.schedule.backup_interval,
            "runtime started"
        );
        availability
    }

    /// Run every task whose deadline has passed, in deadline order
    pub fn run_due(&mut self) -> Vec<ScheduledKind> {
        let due = self.scheduler.poll(self.clock.now());
        due.into_iter()
            .map(|item| {
                self.dispatch(item.kind);
                item.kind
            })
            .collect()
    }

    /// Run one task immediately, outside its schedule
    pub fn dispatch(&mut self, kind: ScheduledKind) {
        tracing::trace!(task = %kind, "dispatch");
        match kind {
            ScheduledKind::Probe => {
                self.probe();
            }
            ScheduledKind::Tick => {
                if let Tick::Retained(sequence) = self.accumulator.tick() {
                    tracing::debug!(sequence, "flush deferred to a later tick");
                }
            }
            ScheduledKind::Suspend => {
                if let SuspendOutcome::Suspended { resume_after } = self.suspend.suspend() {
                    let at = self.clock.now() + resume_after;
                    self.scheduler
                        .rearm(ScheduledKind::Resume.id(), at, ScheduledKind::Resume);
                }
            }
            ScheduledKind::Backup => match self.backup.create_backup() {
                Ok(report) => {
                    if let Ok(retention) = report.retention {
                        tracing::debug!(
                            deleted = retention.deleted.len(),
                            remaining = retention.remaining,
                            "retention pass complete"
                        );
                    }
                }
                // Failures were logged where they happened
                Err(_) => {}
            },
            ScheduledKind::Resume => {
                self.suspend.resume();
            }
        }
    }

    /// Final best-effort flush before the process exits
    pub fn shutdown(&mut self) -> Result<Flushed, WriteError> {
        let result = self.writer.flush();
        match &result {
            Ok(flushed) => tracing::info!(records = flushed.records, "shutdown flush complete"),
            Err(e) => tracing::error!(
                error = %e,
                lost = self.state.buffer().record_count(),
                "shutdown flush failed"
            ),
        }
        result
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_fire_time()
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    pub fn suspend_phase(&self) -> SuspendState {
        self.suspend.phase()
    }

    pub fn status(&self) -> RuntimeStatus {
        RuntimeStatus {
            state: self.state.snapshot(),
            phase: self.suspend.phase(),
            next_deadline: self.next_deadline(),
        }
    }

    fn probe(&mut self) -> AvailabilityState {
        let availability = self.monitor.probe();
        if availability.is_available() {
            self.recover_sequence();
        }
        availability
    }

    /// Continue numbering after the last record already on the device
    ///
    /// Runs once, the first time storage is seen. A failed read is retried on
    /// the next available probe; ticks stay gated until a read succeeds.
    fn recover_sequence(&mut self) {
        if !self.resume_sequence || self.sequence_recovered {
            return;
        }
        let primary_log = self.writer.primary_log();
        match read_primary_log(&self.storage, primary_log) {
            Ok(scan) => {
                if scan.malformed > 0 {
                    tracing::warn!(
                        file = %primary_log,
                        malformed = scan.malformed,
                        "skipped malformed lines in primary log"
                    );
                }
                if let Some(last) = scan.last_sequence() {
                    self.state.resume_sequence_after(last);
                    tracing::info!(last, "resuming sequence from primary log");
                }
                self.sequence_recovered = true;
                self.state.set_sequence_ready(true);
            }
            Err(e) => {
                tracing::warn!(file = %primary_log, error = %e, "failed to read primary log");
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
