// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sysfs LED indicator

use super::FaultIndicator;
use std::path::{Path, PathBuf};

/// Drives an LED through its sysfs `brightness` file
///
/// Write failures are logged and reported to the caller, never propagated as
/// errors; a broken LED must not stop the logger.
#[derive(Clone, Debug)]
pub struct LedFault {
    brightness: PathBuf,
}

impl LedFault {
    pub fn new(brightness: impl Into<PathBuf>) -> Self {
        Self {
            brightness: brightness.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.brightness
    }
}

impl FaultIndicator for LedFault {
    fn set_fault(&self, on: bool) -> bool {
        let value = if on { "1" } else { "0" };
        match std::fs::write(&self.brightness, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    path = %self.brightness.display(),
                    error = %e,
                    "failed to drive fault LED"
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "led_tests.rs"]
mod tests;
