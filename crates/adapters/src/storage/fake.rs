// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory storage for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Storage, StorageError};
use std::collections::HashSet;
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Recorded storage call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Initialize,
    OpenAppend { name: String },
    OpenWrite { name: String },
    OpenRead { name: String },
    List,
    Remove { name: String },
}

#[derive(Default)]
struct FakeState {
    /// Files in creation order, which is also listing order
    files: Vec<(String, Vec<u8>)>,
    calls: Vec<StorageCall>,
    available: bool,
    // Configurable failure modes
    open_fails: HashSet<String>,
    remove_fails: HashSet<String>,
    write_fails: bool,
    list_fails: bool,
}

impl FakeState {
    fn file_mut(&mut self, name: &str) -> Option<&mut Vec<u8>> {
        self.files
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    fn check_open(&self, name: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if self.open_fails.contains(name) {
            return Err(StorageError::Io(io::Error::other(format!(
                "injected open failure: {}",
                name
            ))));
        }
        Ok(())
    }
}

/// Fake storage with call recording and failure injection
#[derive(Clone)]
pub struct FakeStorage {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStorage {
    /// An available, empty device
    pub fn new() -> Self {
        let state = FakeState {
            available: true,
            ..FakeState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or replace a file
    pub fn put(&self, name: &str, content: &str) {
        let mut state = self.lock();
        match state.file_mut(name) {
            Some(data) => *data = content.as_bytes().to_vec(),
            None => state
                .files
                .push((name.to_string(), content.as_bytes().to_vec())),
        }
    }

    /// Content of a file, if it exists
    pub fn contents(&self, name: &str) -> Option<String> {
        self.lock()
            .files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| String::from_utf8_lossy(data).to_string())
    }

    /// File names in listing order
    pub fn file_names(&self) -> Vec<String> {
        self.lock().files.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Simulate inserting or pulling the device
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    /// Make every open of `name` fail
    pub fn fail_open(&self, name: &str) {
        self.lock().open_fails.insert(name.to_string());
    }

    /// Undo [`FakeStorage::fail_open`] for `name`
    pub fn restore_open(&self, name: &str) {
        self.lock().open_fails.remove(name);
    }

    /// Make every removal of `name` fail
    pub fn fail_remove(&self, name: &str) {
        self.lock().remove_fails.insert(name.to_string());
    }

    /// Make writes through any open handle fail
    pub fn set_write_fails(&self, fails: bool) {
        self.lock().write_fails = fails;
    }

    pub fn set_list_fails(&self, fails: bool) {
        self.lock().list_fails = fails;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StorageCall> {
        self.lock().calls.clone()
    }

    /// Number of appends opened on `name`
    pub fn append_count(&self, name: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StorageCall::OpenAppend { name: n } if n == name))
            .count()
    }
}

/// Write handle onto a fake file
pub struct FakeWriter {
    state: Arc<Mutex<FakeState>>,
    name: String,
}

impl Write for FakeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.write_fails || !state.available {
            return Err(io::Error::other("injected write failure"));
        }
        match state.file_mut(&self.name) {
            Some(data) => data.extend_from_slice(buf),
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Storage for FakeStorage {
    type Reader = Cursor<Vec<u8>>;
    type Writer = FakeWriter;

    fn initialize(&self) -> bool {
        let mut state = self.lock();
        state.calls.push(StorageCall::Initialize);
        state.available
    }

    fn is_available(&self) -> bool {
        self.lock().available
    }

    fn open_append(&self, name: &str) -> Result<FakeWriter, StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::OpenAppend {
            name: name.to_string(),
        });
        state.check_open(name)?;
        if state.file_mut(name).is_none() {
            state.files.push((name.to_string(), Vec::new()));
        }
        Ok(FakeWriter {
            state: Arc::clone(&self.state),
            name: name.to_string(),
        })
    }

    fn open_write(&self, name: &str) -> Result<FakeWriter, StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::OpenWrite {
            name: name.to_string(),
        });
        state.check_open(name)?;
        match state.file_mut(name) {
            Some(data) => data.clear(),
            None => state.files.push((name.to_string(), Vec::new())),
        }
        Ok(FakeWriter {
            state: Arc::clone(&self.state),
            name: name.to_string(),
        })
    }

    fn open_read(&self, name: &str) -> Result<Cursor<Vec<u8>>, StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::OpenRead {
            name: name.to_string(),
        });
        state.check_open(name)?;
        state
            .file_mut(name)
            .map(|data| Cursor::new(data.clone()))
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::List);
        if !state.available {
            return Err(StorageError::Unavailable);
        }
        if state.list_fails {
            return Err(StorageError::Io(io::Error::other("injected list failure")));
        }
        Ok(state.files.iter().map(|(n, _)| n.clone()).collect())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.calls.push(StorageCall::Remove {
            name: name.to_string(),
        });
        if !state.available {
            return Err(StorageError::Unavailable);
        }
        if state.remove_fails.contains(name) {
            return Err(StorageError::Io(io::Error::other(format!(
                "injected remove failure: {}",
                name
            ))));
        }
        let before = state.files.len();
        state.files.retain(|(n, _)| n != name);
        if state.files.len() == before {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
