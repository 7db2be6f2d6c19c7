// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fault indicator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::FaultIndicator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Fake indicator that records every call
#[derive(Clone, Default)]
pub struct FakeFault {
    calls: Arc<Mutex<Vec<bool>>>,
    fails: Arc<AtomicBool>,
}

impl FakeFault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value passed to `set_fault`, in order
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Current indicator state (off until first set)
    pub fn is_on(&self) -> bool {
        self.calls().last().copied().unwrap_or(false)
    }

    /// Make later calls report failure; attempts are still recorded
    pub fn set_fails(&self, fails: bool) {
        self.fails.store(fails, Ordering::SeqCst);
    }
}

impl FaultIndicator for FakeFault {
    fn set_fault(&self, on: bool) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(on);
        !self.fails.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
