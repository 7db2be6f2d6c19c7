// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sdlog-core: Core types for the sdlog persistent logger
//!
//! This crate provides:
//! - The clock collaborator and timestamps
//! - Records and the in-memory log buffer
//! - Backup naming with embedded creation stamps
//! - Shared gate state used by every scheduled task
//! - TOML configuration

pub mod backup;
pub mod clock;
pub mod config;
pub mod record;
pub mod state;
pub mod timestamp;

// Re-exports
pub use backup::BackupEntry;
pub use clock::{Clock, FakeClock, SystemClock, TickClock};
pub use config::{ClockSource, Config, ConfigError};
pub use record::{BufferLimit, LogBuffer, Record, ThresholdUnit};
pub use state::{AvailabilityState, SharedState, StateSnapshot};
pub use timestamp::Timestamp;
