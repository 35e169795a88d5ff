// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single-threaded cooperative scheduler loop (spec §4.2, §5): owns
//! the event queue and the object-graph write lock, and is the only task
//! that ever dispatches checks or processes their results.

use crate::event_queue::EventQueue;
use crate::freshness::{host_freshness_due, service_freshness_due};
use crate::host_sm::{handle_host_result, pre_adjust_host_attempt, HostResultOutcome};
use crate::macros::{expand_host_command_line, expand_service_command_line};
use crate::pool::{ExecutionPool, Job};
use crate::service_sm::handle_service_result;
use monitor_core::{
    CheckOptions, CheckResult, CheckSubject, CheckType, Clock, EngineCallbacks, EngineConfig, Event,
    EventKind, HostState,
};
use monitor_objects::{DynamicRegistry, ObjectGraph};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::{mpsc, Notify};
use tokio::time::sleep;

/// Administrative commands the scheduler accepts from the command channel
/// (spec §4.2 step 5; only the toggles relevant to the core are modeled
/// here, the rest of the external-command surface lives in the daemon).
#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    EnableHostActiveChecks { host_name: String, enabled: bool },
    EnableServiceActiveChecks { host_name: String, description: String, enabled: bool },
    ForceHostCheck { host_name: String },
    ForceServiceCheck { host_name: String, description: String },
}

/// Outcome of the eligibility gate in `fire_ready_events` (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventDecision {
    Run,
    RequeueWithNudge,
    Drop,
}

/// Uniform jitter in `[5, 17]` seconds applied when an event is
/// rescheduled instead of run (spec §4.2).
fn nudge() -> Duration {
    Duration::from_secs(rand::random::<u64>() % 13 + 5)
}

/// Backward jump past 30s, or forward jump past 5min, between two
/// consecutive scheduler ticks (spec §4.2 time-change compensation).
///
/// `Event::run_time` is a monotonic `Instant`, which by construction never
/// moves backward, so the spec's literal "wall time jumped backward"
/// branch has no analog for queue ordering: it can only ever affect
/// timestamps recorded for humans (status file, logs). The forward branch
/// still matters, since `CLOCK_MONOTONIC` commonly stalls across a
/// process/VM suspend while the wall clock keeps advancing; this function
/// stays symmetric with the spec's wording and is exercised against plain
/// `SystemTime` values so both directions remain testable.
fn detect_time_jump(last_wall: SystemTime, current_wall: SystemTime) -> bool {
    if let Ok(backward) = last_wall.duration_since(current_wall) {
        if backward > Duration::from_secs(30) {
            return true;
        }
    }
    if let Ok(forward) = current_wall.duration_since(last_wall) {
        if forward > Duration::from_secs(5 * 60) {
            return true;
        }
    }
    false
}

fn decide_service_check(
    active_checks_enabled: Option<bool>,
    options: CheckOptions,
    running_service_checks: u64,
    concurrency_limit: u64,
) -> EventDecision {
    let Some(enabled) = active_checks_enabled else {
        return EventDecision::Drop;
    };
    let forced = options.contains(CheckOptions::FORCE_EXECUTION);
    if !forced && !enabled {
        return EventDecision::RequeueWithNudge;
    }
    if !forced && running_service_checks >= concurrency_limit {
        return EventDecision::RequeueWithNudge;
    }
    EventDecision::Run
}

fn decide_host_check(active_checks_enabled: Option<bool>, options: CheckOptions) -> EventDecision {
    let Some(enabled) = active_checks_enabled else {
        return EventDecision::Drop;
    };
    let forced = options.contains(CheckOptions::FORCE_EXECUTION);
    if !forced && !enabled {
        return EventDecision::RequeueWithNudge;
    }
    EventDecision::Run
}

fn is_orphaned(
    next_check: Option<SystemTime>,
    latency: Duration,
    timeout: Duration,
    reaper_slack: Duration,
    now: SystemTime,
) -> bool {
    match next_check {
        Some(next_check) => next_check + latency + timeout + reaper_slack < now,
        None => false,
    }
}

pub struct Scheduler {
    graph: Arc<ObjectGraph>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    callbacks: Arc<dyn EngineCallbacks>,
    queue: EventQueue,
    pool: ExecutionPool,
    registry: DynamicRegistry,
    results_rx: mpsc::Receiver<CheckResult>,
    command_rx: mpsc::Receiver<SchedulerCommand>,
    stop: Arc<Notify>,
    running_service_checks: u64,
    concurrency_limit: u64,
    last_tick_wall: SystemTime,
}

impl Scheduler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graph: Arc<ObjectGraph>,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        callbacks: Arc<dyn EngineCallbacks>,
        concurrency: i64,
        results_tx: mpsc::Sender<CheckResult>,
        results_rx: mpsc::Receiver<CheckResult>,
        command_rx: mpsc::Receiver<SchedulerCommand>,
        stop: Arc<Notify>,
    ) -> Self {
        let concurrency_limit = if concurrency <= 0 {
            crate::pool::DEFAULT_CONCURRENCY as u64
        } else {
            concurrency as u64
        };
        let pool = ExecutionPool::new(concurrency, results_tx);
        let now = clock.now();

        let mut queue = EventQueue::new();
        queue.push(Event::new(EventKind::StatusSave, now).recurring(Duration::from_secs(60)));
        queue.push(Event::new(EventKind::RetentionSave, now).recurring(Duration::from_secs(60)));
        queue.push(Event::new(EventKind::LogRotation, now).recurring(Duration::from_secs(3600)));
        queue.push(
            Event::new(EventKind::ServiceFreshness, now)
                .recurring(config.service_freshness_check_interval),
        );
        queue.push(Event::new(EventKind::HostFreshness, now).recurring(config.host_freshness_check_interval));
        queue.push(Event::new(EventKind::OrphanSweep, now).recurring(config.orphan_check_interval));
        queue.push(Event::new(EventKind::DynamicPrune, now).recurring(config.dynamic_prune_interval));

        let dynamic_object_ttl = config.dynamic_object_ttl;
        let last_tick_wall = clock.wall_now();
        Self {
            graph,
            config,
            clock,
            callbacks,
            queue,
            pool,
            registry: DynamicRegistry::new(dynamic_object_ttl),
            results_rx,
            command_rx,
            stop,
            running_service_checks: 0,
            concurrency_limit,
            last_tick_wall,
        }
    }

    /// Seed an initial check event for every host/service currently in the
    /// graph. Called once after configuration load, before `run`.
    pub fn seed_initial_checks(&mut self) {
        let graph = self.graph.read();
        let now = self.clock.now();
        for host in graph.hosts() {
            self.queue.push(Event::new(
                EventKind::HostCheck { subject: CheckSubject::host(host.name.as_str()), options: CheckOptions::empty() },
                now,
            ));
        }
        for service in graph.services() {
            self.queue.push(Event::new(
                EventKind::ServiceCheck {
                    subject: CheckSubject::service(service.key.host_name.as_str(), service.key.description.as_str()),
                    options: CheckOptions::empty(),
                },
                now,
            ));
        }
    }

    pub async fn run(mut self) {
        loop {
            let horizon = self
                .queue
                .peek()
                .map(|e| e.run_time)
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(1));
            let timer = sleep(horizon.saturating_duration_since(Instant::now()));

            tokio::select! {
                () = timer => {
                    self.tick();
                }
                result = self.results_rx.recv() => {
                    match result {
                        Some(result) => self.process_result(result),
                        None => break,
                    }
                }
                command = self.command_rx.recv() => {
                    if let Some(command) = command {
                        self.process_command(command);
                    }
                }
                () = self.stop.notified() => {
                    break;
                }
            }
        }
        self.pool.shutdown().await;
    }

    fn tick(&mut self) {
        let now_wall = self.clock.wall_now();
        if detect_time_jump(self.last_tick_wall, now_wall) {
            tracing::warn!("wall clock jump detected, rebuilding event queue");
            self.compensate_for_time_jump();
        }
        self.last_tick_wall = now_wall;
        self.fire_ready_events();
    }

    fn compensate_for_time_jump(&mut self) {
        let now = self.clock.now();
        let horizon = now + Duration::from_secs(5 * 60);
        let events = self
            .queue
            .drain_all()
            .into_iter()
            .map(|mut event| {
                if event.run_time > horizon {
                    event.run_time = now + nudge();
                }
                event
            })
            .collect();
        self.queue.rebuild(events);
    }

    fn fire_ready_events(&mut self) {
        let now = self.clock.now();
        let grace = now + Duration::from_millis(100);
        let ready = self.queue.drain_ready(grace);
        for event in ready {
            let decision = self.decide(&event);
            match decision {
                EventDecision::Drop => continue,
                EventDecision::RequeueWithNudge => {
                    let mut event = event;
                    event.run_time = now + nudge();
                    self.queue.push(event);
                    continue;
                }
                EventDecision::Run => {}
            }

            let recurring_interval = event.recurring_interval;
            let event_run_time = event.run_time;
            self.dispatch(&event, now);

            if let Some(interval) = recurring_interval {
                let mut next_run = event_run_time + interval;
                while next_run <= now {
                    next_run += interval;
                }
                self.queue.push(Event { run_time: next_run, ..event });
            }
        }
    }

    fn decide(&self, event: &Event) -> EventDecision {
        match &event.kind {
            EventKind::ServiceCheck { subject, options } => {
                let graph = self.graph.read();
                let enabled = graph
                    .service(&subject.host_name, subject.service_description.as_deref().unwrap_or(""))
                    .map(|s| s.active_checks_enabled);
                decide_service_check(enabled, *options, self.running_service_checks, self.concurrency_limit)
            }
            EventKind::HostCheck { subject, options } => {
                let graph = self.graph.read();
                let enabled = graph.host(&subject.host_name).map(|h| h.active_checks_enabled);
                decide_host_check(enabled, *options)
            }
            _ => EventDecision::Run,
        }
    }

    fn dispatch(&mut self, event: &Event, now: Instant) {
        match &event.kind {
            EventKind::ServiceCheck { subject, options } => {
                self.dispatch_service_check(subject, *options, event.run_time, now)
            }
            EventKind::HostCheck { subject, options } => {
                self.dispatch_host_check(subject, *options, event.run_time, now)
            }
            EventKind::StatusSave => self.callbacks.on_status_save(),
            EventKind::RetentionSave => self.callbacks.on_retention_save(),
            EventKind::LogRotation => self.callbacks.on_log_rotation(),
            EventKind::ServiceFreshness => self.run_service_freshness(),
            EventKind::HostFreshness => self.run_host_freshness(),
            EventKind::OrphanSweep => self.run_orphan_sweep(now),
            EventKind::DynamicPrune => {
                let mut graph = self.graph.write();
                let (services_pruned, hosts_pruned) = self.registry.prune(&mut graph, self.clock.as_ref());
                if services_pruned > 0 || hosts_pruned > 0 {
                    tracing::info!(services_pruned, hosts_pruned, "dynamic objects pruned");
                }
            }
            EventKind::Reaper => {}
        }
    }

    fn dispatch_service_check(&mut self, subject: &CheckSubject, options: CheckOptions, run_time: Instant, now: Instant) {
        let description = subject.service_description.clone().unwrap_or_default();
        let latency = now.saturating_duration_since(run_time);

        let mut graph = self.graph.write();
        let Some(host) = graph.host(&subject.host_name).cloned() else {
            return;
        };
        let Some(command) = graph
            .service(&subject.host_name, &description)
            .and_then(|s| graph.command(s.check_command.as_str()))
            .cloned()
        else {
            return;
        };
        let Some(service) = graph.service_mut(&subject.host_name, &description) else {
            return;
        };

        service.is_executing = true;
        self.running_service_checks += 1;
        let command_line = expand_service_command_line(&command.line, &host, service, &service.check_args);
        drop(graph);

        let job = Job {
            subject: subject.clone(),
            check_type: CheckType::Active,
            command: Some(command.name.clone()),
            command_line,
            timeout: self.config.service_check_timeout,
            check_options: options,
            dynamic_register: false,
            latency,
        };
        self.pool.submit(job);
    }

    fn dispatch_host_check(&mut self, subject: &CheckSubject, options: CheckOptions, run_time: Instant, now: Instant) {
        let latency = now.saturating_duration_since(run_time);

        let mut graph = self.graph.write();
        let Some(command) = graph
            .host(&subject.host_name)
            .and_then(|h| graph.command(h.check_command.as_str()))
            .cloned()
        else {
            return;
        };
        let Some(host) = graph.host_mut(&subject.host_name) else {
            return;
        };

        pre_adjust_host_attempt(host);
        host.is_executing = true;
        let command_line = expand_host_command_line(&command.line, host, &host.check_args);
        drop(graph);

        let job = Job {
            subject: subject.clone(),
            check_type: CheckType::Active,
            command: Some(command.name.clone()),
            command_line,
            timeout: self.config.host_check_timeout,
            check_options: options,
            dynamic_register: false,
            latency,
        };
        self.pool.submit(job);
    }

    fn run_service_freshness(&mut self) {
        let event_start = self.clock.wall_now();
        let wall_now = self.clock.wall_now();
        let mut due = Vec::new();
        {
            let graph = self.graph.read();
            for service in graph.services() {
                if service_freshness_due(service, &self.config, event_start, wall_now) {
                    due.push(CheckSubject::service(service.key.host_name.as_str(), service.key.description.as_str()));
                }
            }
        }
        let monotonic_now = self.clock.now();
        let mut graph = self.graph.write();
        for subject in due {
            if let Some(service) = graph.service_mut(
                &subject.host_name,
                subject.service_description.as_deref().unwrap_or(""),
            ) {
                service.is_being_freshened = true;
            }
            self.queue.push(Event::new(
                EventKind::ServiceCheck {
                    subject,
                    options: CheckOptions::FORCE_EXECUTION | CheckOptions::FRESHNESS_CHECK,
                },
                monotonic_now,
            ));
        }
    }

    fn run_host_freshness(&mut self) {
        let event_start = self.clock.wall_now();
        let wall_now = self.clock.wall_now();
        let mut due = Vec::new();
        {
            let graph = self.graph.read();
            for host in graph.hosts() {
                if host_freshness_due(host, &self.config, event_start, wall_now) {
                    due.push(CheckSubject::host(host.name.as_str()));
                }
            }
        }
        let monotonic_now = self.clock.now();
        let mut graph = self.graph.write();
        for subject in due {
            if let Some(host) = graph.host_mut(&subject.host_name) {
                host.is_being_freshened = true;
            }
            self.queue.push(Event::new(
                EventKind::HostCheck {
                    subject,
                    options: CheckOptions::FORCE_EXECUTION | CheckOptions::FRESHNESS_CHECK,
                },
                monotonic_now,
            ));
        }
    }

    fn run_orphan_sweep(&mut self, now: Instant) {
        let wall_now = self.clock.wall_now();
        let reaper_slack = self.config.check_reaper_interval;
        let service_timeout = self.config.service_check_timeout;
        let host_timeout = self.config.host_check_timeout;
        let mut to_recheck = Vec::new();
        {
            let mut graph = self.graph.write();
            for service in graph.services_mut() {
                if service.is_executing
                    && is_orphaned(service.next_check, service.latency, service_timeout, reaper_slack, wall_now)
                {
                    service.is_executing = false;
                    service.latency = Duration::ZERO;
                    to_recheck.push(CheckSubject::service(service.key.host_name.as_str(), service.key.description.as_str()));
                }
            }
            for host in graph.hosts_mut() {
                if host.is_executing && is_orphaned(host.next_check, host.latency, host_timeout, reaper_slack, wall_now) {
                    host.is_executing = false;
                    host.latency = Duration::ZERO;
                    to_recheck.push(CheckSubject::host(host.name.as_str()));
                }
            }
        }
        for subject in to_recheck {
            tracing::warn!(subject = ?subject, "orphaned check detected, forcing a re-check");
            let kind = if subject.is_service() {
                EventKind::ServiceCheck { subject, options: CheckOptions::FORCE_EXECUTION | CheckOptions::ORPHAN_CHECK }
            } else {
                EventKind::HostCheck { subject, options: CheckOptions::FORCE_EXECUTION | CheckOptions::ORPHAN_CHECK }
            };
            self.queue.push(Event::new(kind, now));
        }
    }

    fn process_result(&mut self, result: CheckResult) {
        let now = self.clock.now();
        if result.subject.is_service() {
            self.process_service_result(result, now);
        } else {
            self.process_host_result(result, now);
        }
    }

    fn process_service_result(&mut self, result: CheckResult, now: Instant) {
        let description = result.subject.service_description.clone().unwrap_or_default();
        let host_name = result.subject.host_name.clone();
        let mut graph = self.graph.write();

        if result.dynamic_register && graph.service(&host_name, &description).is_none() {
            self.registry.ensure_service(
                &mut graph,
                self.clock.as_ref(),
                &host_name,
                &description,
                &self.config.dynamic_default_command,
            );
        }

        let host_is_up = graph.host(&host_name).map(|h| h.current_state == HostState::Up).unwrap_or(true);
        let Some(service) = graph.service_mut(&host_name, &description) else {
            self.running_service_checks = self.running_service_checks.saturating_sub(1);
            return;
        };
        let outcome = handle_service_result(service, host_is_up, &result, &self.config, self.callbacks.as_ref());
        self.running_service_checks = self.running_service_checks.saturating_sub(1);
        drop(graph);

        self.queue.push(Event::new(
            EventKind::ServiceCheck { subject: result.subject.clone(), options: CheckOptions::empty() },
            now + outcome.next_interval,
        ));
    }

    fn process_host_result(&mut self, result: CheckResult, now: Instant) {
        let host_name = result.subject.host_name.clone();

        if result.dynamic_register {
            let mut graph = self.graph.write();
            if graph.host(&host_name).is_none() {
                self.registry.ensure_host(&mut graph, self.clock.as_ref(), &host_name, &self.config.dynamic_default_command);
            }
        }

        let (has_parents, any_parent_up) = {
            let graph = self.graph.read();
            match graph.host(&host_name) {
                Some(host) if !host.parents.is_empty() => {
                    let any_up = host.parents.iter().any(|parent_name| {
                        graph.host(parent_name.as_str()).map(|p| p.current_state == HostState::Up).unwrap_or(false)
                    });
                    (true, any_up)
                }
                _ => (false, false),
            }
        };

        let mut graph = self.graph.write();
        let Some(host) = graph.host_mut(&host_name) else {
            return;
        };
        let outcome: HostResultOutcome =
            handle_host_result(host, &result, &self.config, has_parents, any_parent_up, self.callbacks.as_ref());
        drop(graph);

        self.queue.push(Event::new(
            EventKind::HostCheck { subject: result.subject.clone(), options: CheckOptions::empty() },
            now + outcome.next_interval,
        ));

        if outcome.went_non_up() || outcome.recovered() {
            self.propagate_reachability(&host_name, outcome, now);
        }
    }

    fn propagate_reachability(&mut self, host_name: &str, outcome: HostResultOutcome, now: Instant) {
        let graph = self.graph.read();
        let Some(host) = graph.host(host_name) else {
            return;
        };

        let mut targets: Vec<String> = Vec::new();
        if outcome.went_non_up() {
            targets.extend(
                host.parents
                    .iter()
                    .filter(|p| graph.host(p.as_str()).map(|h| h.current_state == HostState::Up).unwrap_or(false))
                    .map(|p| p.as_str().to_string()),
            );
            targets.extend(
                graph
                    .hosts()
                    .filter(|child| child.parents.iter().any(|p| p.as_str() == host_name))
                    .filter(|child| child.current_state != HostState::Unreachable)
                    .map(|child| child.name.as_str().to_string()),
            );
        } else {
            targets.extend(
                host.parents
                    .iter()
                    .filter(|p| graph.host(p.as_str()).map(|h| h.current_state != HostState::Up).unwrap_or(false))
                    .map(|p| p.as_str().to_string()),
            );
            targets.extend(
                graph
                    .hosts()
                    .filter(|child| child.parents.iter().any(|p| p.as_str() == host_name))
                    .filter(|child| child.current_state != HostState::Up)
                    .map(|child| child.name.as_str().to_string()),
            );
        }
        drop(graph);

        let wall_now = self.clock.wall_now();
        for target in targets {
            self.callbacks.schedule_host_check(&target, wall_now, CheckOptions::DEPENDENCY_CHECK);
            self.queue.push(Event::new(
                EventKind::HostCheck {
                    subject: CheckSubject::host(target),
                    options: CheckOptions::FORCE_EXECUTION | CheckOptions::DEPENDENCY_CHECK,
                },
                now,
            ));
        }
    }

    fn process_command(&mut self, command: SchedulerCommand) {
        match command {
            SchedulerCommand::EnableHostActiveChecks { host_name, enabled } => {
                let mut graph = self.graph.write();
                if let Some(host) = graph.host_mut(&host_name) {
                    host.active_checks_enabled = enabled;
                }
            }
            SchedulerCommand::EnableServiceActiveChecks { host_name, description, enabled } => {
                let mut graph = self.graph.write();
                if let Some(service) = graph.service_mut(&host_name, &description) {
                    service.active_checks_enabled = enabled;
                }
            }
            SchedulerCommand::ForceHostCheck { host_name } => {
                self.queue.push(Event::new(
                    EventKind::HostCheck {
                        subject: CheckSubject::host(host_name),
                        options: CheckOptions::FORCE_EXECUTION,
                    },
                    self.clock.now(),
                ));
            }
            SchedulerCommand::ForceServiceCheck { host_name, description } => {
                self.queue.push(Event::new(
                    EventKind::ServiceCheck {
                        subject: CheckSubject::service(host_name, description),
                        options: CheckOptions::FORCE_EXECUTION,
                    },
                    self.clock.now(),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
