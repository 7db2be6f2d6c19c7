// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-backed storage
//!
//! The directory stands in for the mount point of a removable card: when it
//! disappears (card pulled, filesystem unmounted) the device is unavailable.

use super::{Storage, StorageError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Storage rooted at a single flat directory
#[derive(Clone, Debug)]
pub struct DirStorage {
    root: PathBuf,
    create_root: bool,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_root: false,
        }
    }

    /// Create the root directory on initialization if it is missing
    pub fn with_create_root(mut self, create: bool) -> Self {
        self.create_root = create;
        self
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !plain {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        if !self.is_available() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.root.join(name))
    }
}

fn not_found(name: &str, err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(name.to_string())
    } else {
        StorageError::Io(err)
    }
}

impl Storage for DirStorage {
    type Reader = BufReader<File>;
    type Writer = File;

    fn initialize(&self) -> bool {
        if self.create_root && fs::create_dir_all(&self.root).is_err() {
            return false;
        }
        fs::read_dir(&self.root).is_ok()
    }

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn open_append(&self, name: &str) -> Result<File, StorageError> {
        let path = self.path_for(name)?;
        Ok(OpenOptions::new().create(true).append(true).open(path)?)
    }

    fn open_write(&self, name: &str) -> Result<File, StorageError> {
        let path = self.path_for(name)?;
        Ok(File::create(path)?)
    }

    fn open_read(&self, name: &str) -> Result<BufReader<File>, StorageError> {
        let path = self.path_for(name)?;
        let file = File::open(path).map_err(|e| not_found(name, e))?;
        Ok(BufReader::new(file))
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        if !self.is_available() {
            return Err(StorageError::Unavailable);
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        fs::remove_file(path).map_err(|e| not_found(name, e))
    }
}

#[cfg(test)]
#[path = "dir_tests.rs"]
mod tests;
