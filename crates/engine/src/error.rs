// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduling/execution layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] monitor_core::CoreError),
    #[error("execution pool is shutting down")]
    PoolClosed,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
