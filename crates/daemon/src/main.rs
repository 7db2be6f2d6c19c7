// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sdlog daemon (sdlogd)
//!
//! Runs the logger schedule until SIGTERM or SIGINT, then flushes whatever is
//! still buffered.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use sdlog_core::config::LogConfig;
use sdlog_core::Config;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::lifecycle::LifecycleError;

/// Upper bound on a single sleep when nothing is scheduled
const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(
    name = "sdlogd",
    version,
    about = "Buffered persistent logger with rotating backups"
)]
struct Args {
    /// Config file (TOML); built-in defaults when omitted
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Validate the config, print the effective settings and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match lifecycle::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sdlogd: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.check {
        print!("{}", lifecycle::describe(&config));
        return ExitCode::SUCCESS;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sdlogd: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), LifecycleError> {
    let _log_guard = setup_logging(&config.log)?;

    let mut runtime = lifecycle::startup(&config);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        let deadline = runtime
            .next_deadline()
            .unwrap_or_else(|| std::time::Instant::now() + IDLE_WAIT);

        tokio::select! {
            _ = tokio::time::sleep_until(deadline.into()) => {
                runtime.run_due();
            }

            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }

            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    if runtime.shutdown().is_err() {
        error!("buffered records were not persisted");
    }
    info!("logger stopped");
    Ok(())
}

fn setup_logging(
    log: &LogConfig,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (writer, guard) = match &log.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| LifecycleError::LogPath(path.clone()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => std::path::Path::new("."),
            };
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // RUST_LOG wins over the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(log.file.is_none()))
        .init();

    Ok(guard)
}
