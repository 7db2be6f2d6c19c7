// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time copies of the primary log
//!
//! Backups copy the file on the device, never the in-memory buffer. Records
//! still buffered at backup time land in the next backup.

use crate::error::{BackupError, RetentionError};
use crate::retention::{BackupRetention, RetentionReport};
use sdlog_adapters::Storage;
use sdlog_core::backup::{self, BackupEntry};
use sdlog_core::{Clock, SharedState};
use std::io::{self, Write};
use std::sync::Arc;

/// Result of a created backup and the retention pass that followed it
#[derive(Debug)]
pub struct BackupReport {
    pub file_name: String,
    pub bytes: u64,
    pub retention: Result<RetentionReport, RetentionError>,
}

pub struct BackupEngine<S, C> {
    state: Arc<SharedState>,
    storage: S,
    clock: C,
    primary_log: String,
    prefix: String,
    max_backups: u32,
    retention: BackupRetention<S>,
    /// Highest stamp handed out, seeded from the device on first use
    last_stamp: Option<u64>,
}

impl<S: Storage, C: Clock> BackupEngine<S, C> {
    pub fn new(
        state: Arc<SharedState>,
        storage: S,
        clock: C,
        primary_log: &str,
        prefix: &str,
        max_backups: u32,
    ) -> Self {
        let retention = BackupRetention::new(storage.clone(), prefix);
        Self {
            state,
            storage,
            clock,
            primary_log: primary_log.to_string(),
            prefix: prefix.to_string(),
            max_backups,
            retention,
            last_stamp: None,
        }
    }

    /// Copy the primary log to a new stamped backup, then enforce retention
    ///
    /// Retention only runs after a complete copy. Its outcome is carried in
    /// the report and does not fail the backup.
    pub fn create_backup(&mut self) -> Result<BackupReport, BackupError> {
        if !self.state.is_available() {
            tracing::debug!("storage unavailable, skipping backup");
            return Err(BackupError::StorageUnavailable);
        }

        let stamp = self.next_stamp();
        let file_name = BackupEntry::file_name_for(&self.prefix, stamp);

        let mut source = self.storage.open_read(&self.primary_log).map_err(|e| {
            tracing::error!(file = %self.primary_log, error = %e, "failed to open primary log for backup");
            BackupError::OpenFailed {
                name: self.primary_log.clone(),
                source: e,
            }
        })?;
        let mut dest = self.storage.open_write(&file_name).map_err(|e| {
            tracing::error!(file = %file_name, error = %e, "failed to create backup");
            BackupError::OpenFailed {
                name: file_name.clone(),
                source: e,
            }
        })?;

        let copied = io::copy(&mut source, &mut dest).and_then(|n| dest.flush().map(|()| n));
        drop(dest);
        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(file = %file_name, error = %e, "backup copy failed");
                if let Err(remove_err) = self.storage.remove(&file_name) {
                    tracing::warn!(file = %file_name, error = %remove_err, "failed to remove partial backup");
                }
                return Err(BackupError::CopyFailed {
                    name: file_name,
                    source: e,
                });
            }
        };

        tracing::info!(file = %file_name, bytes, "backup created");
        let retention = self.retention.enforce(self.max_backups);
        Ok(BackupReport {
            file_name,
            bytes,
            retention,
        })
    }

    /// Stamp for the next backup, strictly above every earlier one
    ///
    /// Two backups within one clock second, or a tick clock restarting from
    /// zero after a reboot, would otherwise repeat or regress the stamp.
    fn next_stamp(&mut self) -> u64 {
        let last = match self.last_stamp {
            Some(last) => Some(last),
            None => self.highest_existing_stamp(),
        };
        let now = self.clock.timestamp().stamp();
        let stamp = match last {
            Some(last) if now <= last => {
                tracing::debug!(now, last, "clock stamp not ahead of last backup, bumping");
                last + 1
            }
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn highest_existing_stamp(&self) -> Option<u64> {
        match self.storage.list() {
            Ok(names) => backup::parse_listing(&self.prefix, &names)
                .iter()
                .map(|entry| entry.created_at)
                .max(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to list existing backups");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
