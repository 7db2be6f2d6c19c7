// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the logging engine
//!
//! Every error is handled where it is detected: the component logs it and
//! returns it for the caller's information. None of them stop the runtime.

use sdlog_adapters::StorageError;
use thiserror::Error;

/// Errors from flushing the buffer to the primary log
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("failed to open {name}: {source}")]
    OpenFailed {
        name: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to write {name}: {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from creating a backup
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("failed to open {name}: {source}")]
    OpenFailed {
        name: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to copy into {name}: {source}")]
    CopyFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a retention pass
#[derive(Debug, Error)]
pub enum RetentionError {
    #[error("failed to list backups: {0}")]
    ListFailed(#[source] StorageError),
    #[error("failed to delete {name}: {source}")]
    DeletionFailed {
        name: String,
        #[source]
        source: StorageError,
    },
}
