// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced storage wrapper for consistent observability

use crate::storage::{Storage, StorageError};

/// Wrapper that adds tracing to any Storage
#[derive(Clone)]
pub struct TracedStorage<S> {
    inner: S,
}

impl<S> TracedStorage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Storage> Storage for TracedStorage<S> {
    type Reader = S::Reader;
    type Writer = S::Writer;

    fn initialize(&self) -> bool {
        let ok = self.inner.initialize();
        tracing::trace!(ok, "storage.initialize");
        ok
    }

    fn is_available(&self) -> bool {
        let available = self.inner.is_available();
        tracing::trace!(available, "storage.is_available");
        available
    }

    fn open_append(&self, name: &str) -> Result<Self::Writer, StorageError> {
        let span = tracing::debug_span!("storage.open_append", name);
        let _guard = span.enter();

        let result = self.inner.open_append(name);
        match &result {
            Ok(_) => tracing::debug!("opened"),
            Err(e) => tracing::warn!(error = %e, "open failed"),
        }
        result
    }

    fn open_write(&self, name: &str) -> Result<Self::Writer, StorageError> {
        let span = tracing::debug_span!("storage.open_write", name);
        let _guard = span.enter();

        let result = self.inner.open_write(name);
        match &result {
            Ok(_) => tracing::debug!("opened"),
            Err(e) => tracing::warn!(error = %e, "open failed"),
        }
        result
    }

    fn open_read(&self, name: &str) -> Result<Self::Reader, StorageError> {
        let span = tracing::debug_span!("storage.open_read", name);
        let _guard = span.enter();

        let result = self.inner.open_read(name);
        match &result {
            Ok(_) => tracing::debug!("opened"),
            // A missing primary log before the first flush is expected
            Err(StorageError::NotFound(_)) => tracing::debug!("not found"),
            Err(e) => tracing::warn!(error = %e, "open failed"),
        }
        result
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let start = std::time::Instant::now();
        let result = self.inner.list();
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(names) => tracing::debug!(entries = names.len(), elapsed_ms, "storage.list"),
            Err(e) => tracing::warn!(error = %e, elapsed_ms, "storage.list failed"),
        }
        result
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let span = tracing::info_span!("storage.remove", name);
        let _guard = span.enter();

        let result = self.inner.remove(name);
        match &result {
            Ok(()) => tracing::debug!("removed"),
            Err(e) => tracing::warn!(error = %e, "remove failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
