// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup wiring: load config, load the object inventory, and assemble
//! the scheduler plus the channels its collaborators (NRDP ingestion, the
//! command-channel listener) need to talk to it. Mirrors the shape of the
//! teacher's `daemon::lifecycle::startup`, generalized from WAL/state
//! recovery to loading a static object graph once at boot.

use crate::callbacks::TracingCallbacks;
use crate::config::{Config, ConfigError};
use crate::objects_load::{self, LoadError};
use monitor_core::{CheckResult, Clock, EngineCallbacks, SystemClock};
use monitor_engine::{Scheduler, SchedulerCommand};
use monitor_objects::{GraphInner, ObjectGraph};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Notify};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load object definitions: {0}")]
    Load(#[from] LoadError),
}

/// Channel capacity for the check-result and command queues: generous
/// relative to the execution pool's own `4 * concurrency` job buffer, since
/// results are drained by the single scheduler loop far faster than checks
/// complete.
const CHANNEL_CAPACITY: usize = 1024;

pub struct Startup {
    pub graph: Arc<ObjectGraph>,
    pub scheduler: Scheduler,
    pub callbacks: Arc<dyn EngineCallbacks>,
    pub clock: Arc<dyn Clock>,
    /// Senders handed to the NRDP ingestion endpoint and the dynamic
    /// registry path: passive results are pushed directly onto the same
    /// channel the execution pool uses, bypassing the command channel
    /// (spec §4.10, §4.11).
    pub results_tx: mpsc::Sender<CheckResult>,
    pub command_tx: mpsc::Sender<SchedulerCommand>,
    pub stop: Arc<Notify>,
}

pub async fn startup(config: &Config) -> Result<Startup, LifecycleError> {
    let mut graph_inner = GraphInner::default();
    if config.objects_path.exists() {
        let defs = objects_load::load_from_path(&config.objects_path)?;
        objects_load::populate(&mut graph_inner, &defs)?;
    } else {
        tracing::warn!(path = %config.objects_path.display(), "no object definitions file found, starting with an empty inventory");
    }
    let graph = Arc::new(ObjectGraph::from_inner(graph_inner));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let callbacks: Arc<dyn EngineCallbacks> = Arc::new(TracingCallbacks::new());
    let stop = Arc::new(Notify::new());

    let (results_tx, results_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let mut scheduler = Scheduler::new(
        Arc::clone(&graph),
        config.engine.clone(),
        Arc::clone(&clock),
        Arc::clone(&callbacks),
        config.concurrency,
        results_tx.clone(),
        results_rx,
        command_rx,
        Arc::clone(&stop),
    );
    scheduler.seed_initial_checks();

    Ok(Startup {
        graph,
        scheduler,
        callbacks,
        clock,
        results_tx,
        command_tx,
        stop,
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
