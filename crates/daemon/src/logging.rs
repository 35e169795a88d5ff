// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured logging setup (spec §10.1): a non-blocking file appender
//! with size-based rotation run once at startup, matching the teacher's
//! `setup_logging`/`rotate_log_if_needed` shape.

use crate::config::{Config, ConfigError};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Maximum log file size before rotation (10 MB).
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rotated log files to keep (monitord.log.1, .2, .3).
const MAX_ROTATED_LOGS: u32 = 3;

/// Rotate the daemon log file if it exceeds [`MAX_LOG_SIZE`]. Best-effort:
/// rotation failures are silently ignored so the daemon still starts.
pub fn rotate_log_if_needed(log_path: &Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };
    if size < MAX_LOG_SIZE {
        return;
    }

    let log_str = log_path.display().to_string();
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = format!("{log_str}.{i}");
        let to = format!("{log_str}.{}", i + 1);
        let _ = std::fs::rename(&from, &to);
    }
    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

/// Install the global `tracing` subscriber. The returned guard must be held
/// for the process lifetime or the non-blocking writer stops flushing.
pub fn setup_logging(config: &Config) -> Result<WorkerGuard, ConfigError> {
    std::fs::create_dir_all(config.log_dir()).map_err(|source| ConfigError::CreateDir {
        path: config.log_dir().to_path_buf(),
        source,
    })?;

    let file_name = config
        .log_path
        .file_name()
        .ok_or(ConfigError::NoStateDir)?;
    let file_appender = tracing_appender::rolling::never(config.log_dir(), file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

/// Startup marker prefix written to the log before anything else, so an
/// external client can find where the current startup attempt begins.
const STARTUP_MARKER_PREFIX: &str = "--- monitord: starting (pid: ";

pub fn write_startup_marker(config: &Config) -> Result<(), ConfigError> {
    use std::io::Write;

    std::fs::create_dir_all(config.log_dir()).map_err(|source| ConfigError::CreateDir {
        path: config.log_dir().to_path_buf(),
        source,
    })?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .map_err(|source| ConfigError::Read {
            path: config.log_path.clone(),
            source,
        })?;
    writeln!(file, "{STARTUP_MARKER_PREFIX}{}) ---\n", std::process::id()).map_err(|source| {
        ConfigError::Read {
            path: config.log_path.clone(),
            source,
        }
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
