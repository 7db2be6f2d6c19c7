// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage availability monitoring
//!
//! Probes the device on a fixed period and tracks the up/down state. Only
//! transitions are reported; repeated probes in the same state stay quiet.

use sdlog_adapters::{FaultIndicator, Storage};
use sdlog_core::{AvailabilityState, SharedState};
use std::sync::Arc;

/// Periodic availability probe
pub struct AvailabilityMonitor<S, F> {
    state: Arc<SharedState>,
    storage: S,
    fault: F,
}

impl<S: Storage, F: FaultIndicator> AvailabilityMonitor<S, F> {
    pub fn new(state: Arc<SharedState>, storage: S, fault: F) -> Self {
        Self {
            state,
            storage,
            fault,
        }
    }

    /// (Re)initialize the device and record the result
    ///
    /// A failed probe is not an error: the state stays unavailable and the
    /// next period tries again.
    pub fn probe(&self) -> AvailabilityState {
        let up = self.storage.initialize();
        let was_up = self.state.set_available(up);

        match (was_up, up) {
            (false, true) => tracing::info!("storage available"),
            (true, false) => tracing::error!("storage unavailable"),
            _ => tracing::trace!(available = up, "probe"),
        }

        publish_fault(&self.state, &self.fault);
        AvailabilityState::from_available(up)
    }
}

/// Push the indicator value to the adapter if it changed
///
/// A value the adapter failed to apply stays pending and is pushed again on
/// the next call, which at the latest is the next probe.
pub(crate) fn publish_fault<F: FaultIndicator>(state: &SharedState, fault: &F) {
    if let Some(on) = state.take_fault_change() {
        if !fault.set_fault(on) {
            state.fault_publish_failed(on);
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
