// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;

use sdlog_adapters::{DirStorage, FaultIndicator, LedFault, LogFault, TracedStorage};
use sdlog_core::{Clock, ClockSource, Config, ConfigError, SystemClock, TickClock, Timestamp};
use sdlog_engine::{Runtime, RuntimeDeps};
use thiserror::Error;
use tracing::info;

/// Daemon runtime with concrete adapter types (storage wrapped with tracing)
pub type DaemonRuntime = Runtime<TracedStorage<DirStorage>, DaemonFault, DaemonClock>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("log file {0} has no file name")]
    LogPath(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clock selected by `clock.source`
#[derive(Clone)]
pub enum DaemonClock {
    Rtc(SystemClock),
    Ticks(TickClock),
}

impl DaemonClock {
    pub fn for_source(source: ClockSource) -> Self {
        match source {
            ClockSource::Rtc => DaemonClock::Rtc(SystemClock),
            ClockSource::Ticks => DaemonClock::Ticks(TickClock::new()),
        }
    }
}

impl Clock for DaemonClock {
    fn now(&self) -> Instant {
        match self {
            DaemonClock::Rtc(clock) => clock.now(),
            DaemonClock::Ticks(clock) => clock.now(),
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            DaemonClock::Rtc(clock) => clock.timestamp(),
            DaemonClock::Ticks(clock) => clock.timestamp(),
        }
    }
}

/// LED when `log.fault_led` is set, otherwise log lines only
#[derive(Clone, Debug)]
pub enum DaemonFault {
    Led(LedFault),
    Log(LogFault),
}

impl DaemonFault {
    pub fn from_config(config: &Config) -> Self {
        match &config.log.fault_led {
            Some(path) => DaemonFault::Led(LedFault::new(path)),
            None => DaemonFault::Log(LogFault),
        }
    }
}

impl FaultIndicator for DaemonFault {
    fn set_fault(&self, on: bool) -> bool {
        match self {
            DaemonFault::Led(led) => led.set_fault(on),
            DaemonFault::Log(log) => log.set_fault(on),
        }
    }
}

/// Load the config file, or the built-in defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<Config, LifecycleError> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };
    Ok(config)
}

/// Build the runtime and arm its schedule
pub fn startup(config: &Config) -> DaemonRuntime {
    let storage = DirStorage::new(&config.storage.root)
        .with_create_root(config.storage.create_root);
    let mut runtime = Runtime::new(
        config,
        RuntimeDeps {
            storage: TracedStorage::new(storage),
            fault: DaemonFault::from_config(config),
            clock: DaemonClock::for_source(config.clock.source),
        },
    );
    let availability = runtime.start();
    info!(
        root = %config.storage.root.display(),
        available = availability.is_available(),
        "logger started"
    );
    runtime
}

/// Human-readable summary of the effective configuration
pub fn describe(config: &Config) -> String {
    let schedule = &config.schedule;
    let mut out = String::new();
    let _ = writeln!(out, "storage root:     {}", config.storage.root.display());
    let _ = writeln!(out, "primary log:      {}", config.storage.primary_log);
    let _ = writeln!(
        out,
        "backups:          {}_<stamp>.txt, keep {}",
        config.storage.backup_prefix, config.retention.max_backups
    );
    let _ = writeln!(
        out,
        "flush threshold:  {} {:?}",
        config.buffer.threshold, config.buffer.unit
    );
    for (name, value) in [
        ("probe every", schedule.probe_interval),
        ("tick every", schedule.tick_interval),
        ("suspend every", schedule.suspend_interval),
        ("suspend grace", schedule.suspend_grace),
        ("backup every", schedule.backup_interval),
    ] {
        let _ = writeln!(out, "{:<18}{}", format!("{}:", name), humantime::format_duration(value));
    }
    let _ = writeln!(out, "clock:            {:?}", config.clock.source);
    out
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
