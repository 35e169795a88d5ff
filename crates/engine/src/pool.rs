// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded check-execution pool (spec §4.3): a fixed worker set, each
//! owning one persistent shell, fed from a bounded job channel.

use monitor_core::{CheckOptions, CheckResult, CheckResultBuilder, CheckSubject, CheckType, CommandName};
use monitor_exec::{CheckExecutor, PersistentShell, TracedExecutor};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

/// Concurrency ≤0 defaults to this (spec §4.3).
pub const DEFAULT_CONCURRENCY: usize = 256;

/// One unit of check work submitted to the pool.
#[derive(Debug, Clone)]
pub struct Job {
    pub subject: CheckSubject,
    pub check_type: CheckType,
    pub command: Option<CommandName>,
    pub command_line: String,
    pub timeout: Duration,
    pub check_options: CheckOptions,
    pub dynamic_register: bool,
    /// `max(0, dispatch_time - event.run_time)`, computed by the scheduler
    /// before submission (spec §4.2).
    pub latency: Duration,
}

/// Owns `N` workers, each backed by one [`PersistentShell`], and a bounded
/// job channel of capacity `4N`. Results are delivered onto the channel
/// given at construction, in completion order.
pub struct ExecutionPool {
    job_tx: mpsc::Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl ExecutionPool {
    pub fn new(concurrency: i64, results_tx: mpsc::Sender<CheckResult>) -> Self {
        let concurrency = if concurrency <= 0 {
            DEFAULT_CONCURRENCY
        } else {
            concurrency as usize
        };
        let (job_tx, job_rx) = mpsc::channel(concurrency * 4);
        let job_rx = Arc::new(AsyncMutex::new(job_rx));

        let workers = (0..concurrency)
            .map(|_| {
                let job_rx = Arc::clone(&job_rx);
                let results_tx = results_tx.clone();
                tokio::spawn(worker_loop(job_rx, results_tx))
            })
            .collect();

        Self { job_tx, workers }
    }

    /// Submit never blocks (spec §4.3 back-pressure): a full channel spawns
    /// a detached task that waits for room instead of stalling the caller.
    pub fn submit(&self, job: Job) {
        match self.job_tx.try_send(job) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(job)) => {
                let tx = self.job_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(job).await;
                });
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("execution pool job channel closed, dropping submission");
            }
        }
    }

    /// Close the job channel and wait for every in-flight worker to drain
    /// its remaining jobs and exit (spec §5 "engine shutdown").
    pub async fn shutdown(self) {
        drop(self.job_tx);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

async fn worker_loop(job_rx: Arc<AsyncMutex<mpsc::Receiver<Job>>>, results_tx: mpsc::Sender<CheckResult>) {
    let mut executor = TracedExecutor::new(PersistentShell::new());
    loop {
        let job = {
            let mut rx = job_rx.lock().await;
            rx.recv().await
        };
        let Some(job) = job else {
            break;
        };

        let start_time = SystemTime::now();
        let raw = executor.execute(&job.command_line, job.timeout).await;
        let finish_time = SystemTime::now();

        let mut builder = CheckResultBuilder::new(job.subject, job.check_type)
            .return_code(raw.return_code)
            .output(raw.output)
            .times(start_time, finish_time)
            .latency(job.latency)
            .early_timeout(raw.early_timeout)
            .exited_ok(raw.exited_ok)
            .check_options(job.check_options)
            .dynamic_register(job.dynamic_register);
        if let Some(command) = job.command {
            builder = builder.command(command);
        }

        if results_tx.send(builder.build()).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
