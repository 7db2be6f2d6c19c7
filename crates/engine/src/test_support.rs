// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for unit tests

use sdlog_adapters::{FakeFault, FakeStorage};
use sdlog_core::{FakeClock, SharedState};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub const PRIMARY: &str = "datalog.txt";
pub const PREFIX: &str = "backup";

/// A writer that captures log output for testing
#[derive(Clone, Default)]
pub struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with tracing output captured (DEBUG and above)
pub fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (logs.contents(), result)
}

/// Fresh fakes plus shared state with storage already marked available
pub struct Harness {
    pub state: Arc<SharedState>,
    pub storage: FakeStorage,
    pub fault: FakeFault,
    pub clock: FakeClock,
}

impl Harness {
    pub fn new() -> Self {
        let state = Arc::new(SharedState::new());
        state.set_available(true);
        Self {
            state,
            storage: FakeStorage::new(),
            fault: FakeFault::new(),
            clock: FakeClock::new(),
        }
    }
}
