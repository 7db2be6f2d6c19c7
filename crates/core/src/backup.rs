// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup file naming
//!
//! Backups carry their creation stamp in the file name
//! (`<prefix>_<stamp>.txt`); there is no separate metadata store.

/// Extension shared by all backup files
pub const BACKUP_EXTENSION: &str = ".txt";

/// A backup file with its creation stamp parsed from the name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub file_name: String,
    pub created_at: u64,
}

impl BackupEntry {
    /// Build the file name for a backup created at `stamp`
    pub fn file_name_for(prefix: &str, stamp: u64) -> String {
        format!("{}_{}{}", prefix, stamp, BACKUP_EXTENSION)
    }

    /// Parse a listing entry, returning `None` for anything that is not a
    /// well-formed backup name for `prefix`
    pub fn parse(prefix: &str, name: &str) -> Option<Self> {
        let stamp = name
            .strip_prefix(prefix)?
            .strip_prefix('_')?
            .strip_suffix(BACKUP_EXTENSION)?;
        if stamp.is_empty() || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            file_name: name.to_string(),
            created_at: stamp.parse().ok()?,
        })
    }
}

/// Whether a listing entry counts toward the retention limit
pub fn is_backup_name(prefix: &str, name: &str) -> bool {
    name.starts_with(prefix)
}

/// Parse every backup in a listing, preserving listing order
pub fn parse_listing<'a>(
    prefix: &str,
    names: impl IntoIterator<Item = &'a String>,
) -> Vec<BackupEntry> {
    names
        .into_iter()
        .filter_map(|name| BackupEntry::parse(prefix, name))
        .collect()
}

/// Oldest entry by stamp; ties go to the first one in listing order
pub fn oldest(entries: &[BackupEntry]) -> Option<&BackupEntry> {
    let mut oldest: Option<&BackupEntry> = None;
    for entry in entries {
        match oldest {
            Some(current) if entry.created_at >= current.created_at => {}
            _ => oldest = Some(entry),
        }
    }
    oldest
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
