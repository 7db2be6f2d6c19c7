// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oldest-first backup eviction
//!
//! Age comes only from the stamp embedded in each file name. Every listing
//! entry starting with the prefix counts toward the limit, but only names
//! with a parseable stamp are candidates for deletion.

use crate::error::RetentionError;
use sdlog_adapters::Storage;
use sdlog_core::backup::{self, BackupEntry};

/// Outcome of a completed retention pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionReport {
    /// Deleted file names, oldest first
    pub deleted: Vec<String>,
    /// Backups left on the device
    pub remaining: usize,
}

pub struct BackupRetention<S> {
    storage: S,
    prefix: String,
}

impl<S: Storage> BackupRetention<S> {
    pub fn new(storage: S, prefix: &str) -> Self {
        Self {
            storage,
            prefix: prefix.to_string(),
        }
    }

    /// Delete the oldest backup until at most `max_count` remain
    ///
    /// The pass aborts on the first failed deletion. It does not skip ahead
    /// to the next-oldest file, so eviction order is always strictly by age.
    pub fn enforce(&self, max_count: u32) -> Result<RetentionReport, RetentionError> {
        let max_count = max_count as usize;
        let mut report = RetentionReport {
            deleted: Vec::new(),
            remaining: self.list_backups()?.len(),
        };

        while report.remaining > max_count {
            let listing = self.list_backups()?;
            let entries = backup::parse_listing(&self.prefix, &listing);
            let Some(BackupEntry { file_name, created_at }) = backup::oldest(&entries).cloned()
            else {
                tracing::warn!(
                    count = report.remaining,
                    max = max_count,
                    "no backup with a parseable stamp, cannot enforce retention"
                );
                break;
            };

            if let Err(source) = self.storage.remove(&file_name) {
                tracing::error!(file = %file_name, error = %source, "failed to delete backup");
                return Err(RetentionError::DeletionFailed {
                    name: file_name,
                    source,
                });
            }
            tracing::info!(file = %file_name, created_at, "deleted backup");
            report.deleted.push(file_name);
            report.remaining -= 1;
        }

        Ok(report)
    }

    fn list_backups(&self) -> Result<Vec<String>, RetentionError> {
        let names = self.storage.list().map_err(|e| {
            tracing::error!(error = %e, "failed to list backups");
            RetentionError::ListFailed(e)
        })?;
        Ok(names
            .into_iter()
            .filter(|name| backup::is_backup_name(&self.prefix, name))
            .collect())
    }
}

#[cfg(test)]
#[path = "retention_tests.rs"]
mod tests;
