// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage capability: a flat namespace of named files on one device

mod dir;

pub use dir::DirStorage;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStorage, StorageCall};

use std::io::{self, Read, Write};
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage device unavailable")]
    Unavailable,
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("invalid file name: {0}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Minimal file-store capability used by the logger
///
/// Handles are closed by dropping them; callers flush writers first so that
/// errors surface before the close.
pub trait Storage: Clone + Send + Sync + 'static {
    type Reader: Read;
    type Writer: Write;

    /// (Re)initialize the device, returning whether it is usable
    fn initialize(&self) -> bool;

    /// Cheap check that the device is still present
    fn is_available(&self) -> bool;

    /// Open a file for appending, creating it if missing
    fn open_append(&self, name: &str) -> Result<Self::Writer, StorageError>;

    /// Open a file for writing, truncating any existing content
    fn open_write(&self, name: &str) -> Result<Self::Writer, StorageError>;

    /// Open an existing file for reading
    fn open_read(&self, name: &str) -> Result<Self::Reader, StorageError>;

    /// Names of all files in the namespace
    fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Remove a file
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}
