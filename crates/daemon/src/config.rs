// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-level configuration: paths, concurrency, and the `EngineConfig`
//! bag the scheduler runs with (spec §6, §10.4). Resolved once at startup
//! from a TOML file layered with `MONITOR_*` environment overrides, the
//! same precedence the teacher's daemon config resolver uses.

use monitor_core::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },
    #[error("no home directory and no MONITOR_STATE_DIR set")]
    NoStateDir,
}

/// Everything the daemon needs that is not already inside `EngineConfig`:
/// filesystem locations and worker-pool sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub state_dir: PathBuf,
    pub objects_path: PathBuf,
    pub log_path: PathBuf,
    pub socket_path: PathBuf,
    pub concurrency: i64,
    pub engine: EngineConfig,
    /// Bcrypt hash of the NRDP submitter token. Empty disables token auth
    /// for non-loopback submitters entirely (they are then rejected).
    pub nrdp_token_hash: String,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = default_state_dir();
        Self {
            objects_path: state_dir.join("objects.toml"),
            log_path: state_dir.join("monitord.log"),
            socket_path: state_dir.join("monitord.sock"),
            state_dir,
            concurrency: 0,
            engine: EngineConfig::default(),
            nrdp_token_hash: String::new(),
        }
    }
}

fn default_state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MONITOR_STATE_DIR") {
        return PathBuf::from(dir);
    }
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|_| PathBuf::from("."));
    base.join("monitor-core")
}

impl Config {
    /// Load `$MONITOR_CONFIG` or `<state_dir>/config.toml`, falling back to
    /// defaults if no file exists, then layer `MONITOR_*` environment
    /// overrides on top — same precedence as the teacher's `env` module.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path = std::env::var("MONITOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config.state_dir.join("config.toml"));

        if config_path.exists() {
            let text = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
            config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: config_path,
                source,
            })?;
        }

        config.apply_env_overrides();
        std::fs::create_dir_all(&config.state_dir).map_err(|source| ConfigError::CreateDir {
            path: config.state_dir.clone(),
            source,
        })?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MONITOR_STATE_DIR") {
            self.state_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MONITOR_OBJECTS_PATH") {
            self.objects_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MONITOR_LOG_PATH") {
            self.log_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MONITOR_SOCKET_PATH") {
            self.socket_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MONITOR_CONCURRENCY") {
            if let Ok(n) = v.parse() {
                self.concurrency = n;
            }
        }
        if let Ok(v) = std::env::var("MONITOR_NRDP_BIND_ADDR") {
            self.engine.nrdp_listen_addr = v;
        }
        if let Ok(v) = std::env::var("MONITOR_NRDP_PATH") {
            self.engine.nrdp_path = v;
        }
        if let Ok(v) = std::env::var("MONITOR_NRDP_ENABLED") {
            self.engine.nrdp_enabled = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("MONITOR_NRDP_TOKEN_HASH") {
            self.nrdp_token_hash = v;
        }
    }

    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join("monitord.lock")
    }

    pub fn log_dir(&self) -> &Path {
        self.log_path.parent().unwrap_or(&self.state_dir)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
