// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file is a
//! valid configuration. Durations use humantime syntax (`"5s"`, `"1h"`).

use crate::backup::is_backup_name;
use crate::record::{BufferLimit, ThresholdUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full logger configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub buffer: BufferConfig,
    pub retention: RetentionConfig,
    pub clock: ClockConfig,
    pub log: LogConfig,
}

/// Where the log and its backups live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory standing in for the mounted storage card
    pub root: PathBuf,
    pub primary_log: String,
    pub backup_prefix: String,
    /// Create `root` on initialization instead of waiting for it to appear
    pub create_root: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/mnt/sd"),
            primary_log: "datalog.txt".to_string(),
            backup_prefix: "backup".to_string(),
            create_root: false,
        }
    }
}

/// Periods of the scheduled tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    #[serde(with = "humantime_serde")]
    pub probe_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub suspend_interval: Duration,
    /// How long writes stay suspended before the automatic resume
    #[serde(with = "humantime_serde")]
    pub suspend_grace: Duration,
    #[serde(with = "humantime_serde")]
    pub backup_interval: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(5),
            tick_interval: Duration::from_secs(1),
            suspend_interval: Duration::from_secs(60),
            suspend_grace: Duration::from_secs(2),
            backup_interval: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    pub threshold: usize,
    pub unit: ThresholdUnit,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            threshold: 10,
            unit: ThresholdUnit::Records,
        }
    }
}

impl BufferConfig {
    pub fn limit(&self) -> BufferLimit {
        BufferLimit {
            threshold: self.threshold,
            unit: self.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionConfig {
    pub max_backups: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { max_backups: 5 }
    }
}

/// Which clock collaborator stamps the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    /// Real-time clock
    #[default]
    Rtc,
    /// Monotonic tick counter
    Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub source: ClockSource,
    /// Continue numbering after the last record in the primary log
    pub resume_sequence: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            source: ClockSource::Rtc,
            resume_sequence: true,
        }
    }
}

/// Diagnostics output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Verbosity threshold, in `EnvFilter` syntax
    pub level: String,
    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
    /// sysfs LED brightness file used as the fault indicator
    pub fault_led: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            fault_led: None,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let schedule = &self.schedule;
        for (name, value) in [
            ("probe_interval", schedule.probe_interval),
            ("tick_interval", schedule.tick_interval),
            ("suspend_interval", schedule.suspend_interval),
            ("suspend_grace", schedule.suspend_grace),
            ("backup_interval", schedule.backup_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "schedule.{} must be non-zero",
                    name
                )));
            }
        }

        if self.buffer.threshold == 0 {
            return Err(ConfigError::Invalid(
                "buffer.threshold must be at least 1".to_string(),
            ));
        }

        let storage = &self.storage;
        check_file_name("storage.primary_log", &storage.primary_log)?;
        check_file_name("storage.backup_prefix", &storage.backup_prefix)?;
        if is_backup_name(&storage.backup_prefix, &storage.primary_log) {
            return Err(ConfigError::Invalid(format!(
                "storage.primary_log {:?} starts with storage.backup_prefix {:?}",
                storage.primary_log, storage.backup_prefix
            )));
        }

        Ok(())
    }
}

fn check_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{} must not be empty", field)));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConfigError::Invalid(format!(
            "{} must be a plain file name, got {:?}",
            field, name
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
