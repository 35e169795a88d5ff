// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced executor wrapper for consistent observability around check
//! execution, independent of which executor backs a given pool worker.

use crate::outcome::RawCheckOutcome;
use async_trait::async_trait;
use std::time::Duration;
use tracing::Instrument;

/// Something that can run one plugin command line to completion (or
/// time out trying). Implemented by [`crate::shell_worker::PersistentShell`]
/// and by [`crate::direct_exec::run_direct`] via a plain function wrapper.
#[async_trait]
pub trait CheckExecutor: Send {
    async fn execute(&mut self, command_line: &str, timeout: Duration) -> RawCheckOutcome;
}

#[async_trait]
impl CheckExecutor for crate::shell_worker::PersistentShell {
    async fn execute(&mut self, command_line: &str, timeout: Duration) -> RawCheckOutcome {
        self.run(command_line, timeout).await
    }
}

/// Wrapper that adds tracing around any [`CheckExecutor`].
pub struct TracedExecutor<E> {
    inner: E,
}

impl<E> TracedExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<E: CheckExecutor> CheckExecutor for TracedExecutor<E> {
    async fn execute(&mut self, command_line: &str, timeout: Duration) -> RawCheckOutcome {
        let span = tracing::info_span!("check.execute", timeout_secs = timeout.as_secs());
        async {
            tracing::debug!(command_line, "dispatching check");
            let start = std::time::Instant::now();
            let outcome = self.inner.execute(command_line, timeout).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            if outcome.early_timeout {
                tracing::warn!(elapsed_ms, "check timed out");
            } else {
                tracing::debug!(
                    elapsed_ms,
                    return_code = outcome.return_code,
                    "check completed"
                );
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
