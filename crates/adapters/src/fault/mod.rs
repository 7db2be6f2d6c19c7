// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fault indicator adapters
//!
//! The indicator is lit while storage is unavailable and while writes are
//! suspended for maintenance ("do not disturb").

mod led;

pub use led::LedFault;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFault;

/// External on/off fault signal
pub trait FaultIndicator: Clone + Send + Sync + 'static {
    /// Drive the indicator; returns false if the value did not reach it
    fn set_fault(&self, on: bool) -> bool;
}

/// Indicator that reports changes through the diagnostics log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFault;

impl FaultIndicator for LogFault {
    fn set_fault(&self, on: bool) -> bool {
        if on {
            tracing::warn!(indicator = "fault", "indicator on");
        } else {
            tracing::info!(indicator = "fault", "indicator off");
        }
        true
    }
}
