// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sdlog logging engine
//!
//! Availability monitoring, buffered writes, the suspend window, backups and
//! retention, driven by a single-threaded scheduler.

mod accumulator;
mod backup;
mod error;
mod log_reader;
mod monitor;
mod retention;
mod runtime;
mod scheduler;
mod suspend;
mod writer;

#[cfg(test)]
mod test_support;

pub use accumulator::{BufferAccumulator, Tick};
pub use backup::{BackupEngine, BackupReport};
pub use error::{BackupError, RetentionError, WriteError};
pub use log_reader::{read_primary_log, LogScan};
pub use monitor::AvailabilityMonitor;
pub use retention::{BackupRetention, RetentionReport};
pub use runtime::{Runtime, RuntimeDeps, RuntimeStatus};
pub use scheduler::{ScheduledItem, ScheduledKind, Scheduler};
pub use suspend::{SuspendController, SuspendOutcome, SuspendState};
pub use writer::{Flushed, PersistentWriter};
