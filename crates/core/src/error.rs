// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the object model and state machines.

use thiserror::Error;

/// Errors raised while building or mutating the core object model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("host already registered: {0}")]
    DuplicateHost(String),
    #[error("service already registered: {0}/{1}")]
    DuplicateService(String, String),
    #[error("command already registered: {0}")]
    DuplicateCommand(String),
    #[error("timeperiod already registered: {0}")]
    DuplicateTimeperiod(String),
    #[error("host not found: {0}")]
    HostNotFound(String),
    #[error("service not found: {0}/{1}")]
    ServiceNotFound(String, String),
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("timeperiod not found: {0}")]
    TimeperiodNotFound(String),
    #[error("dependency cycle detected starting at: {0}")]
    DependencyCycle(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
