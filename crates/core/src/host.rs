// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host identity, configuration, and runtime state (spec §3).

use crate::check_options::CheckOptions;
use crate::command::CommandName;
use crate::flap::FlapHistory;
use crate::timeperiod::TimeperiodName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

crate::define_id! {
    /// Unique name of a host.
    pub struct HostName;
}

/// Runtime health state of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostState {
    Up,
    Down,
    Unreachable,
}

impl HostState {
    pub fn is_up(&self) -> bool {
        matches!(self, HostState::Up)
    }
}

/// Whether an object's current state has survived the full attempt ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateType {
    Soft,
    Hard,
}

/// How a problem acknowledgement behaves across state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AcknowledgementType {
    #[default]
    None,
    /// Cleared on the next state change.
    Normal,
    /// Survives state changes until the problem is resolved.
    Sticky,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct HostNotifyOn: u8 {
        const DOWN        = 0b00001;
        const UNREACHABLE = 0b00010;
        const RECOVERY    = 0b00100;
        const FLAPPING    = 0b01000;
        const DOWNTIME    = 0b10000;
    }
}

/// Freshness-check configuration, shared shape between hosts and services.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FreshnessConfig {
    pub check_freshness: bool,
    /// `None` means "derive from check_interval" (spec §4.9).
    pub freshness_threshold: Option<u32>,
}

/// A monitored host: identity + configuration (set once from the object
/// graph) and runtime fields (mutated by the scheduler/state machine under
/// the object-graph write lock).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    // -- identity --
    pub name: HostName,
    pub alias: String,
    pub address: String,
    pub display_name: String,

    // -- configuration --
    pub check_command: CommandName,
    pub check_args: Vec<String>,
    pub active_checks_enabled: bool,
    pub passive_checks_enabled: bool,
    pub check_interval: f64,
    pub retry_interval: f64,
    pub max_check_attempts: u32,
    pub notification_options: HostNotifyOn,
    pub check_period: Option<TimeperiodName>,
    pub parents: Vec<HostName>,
    pub flap_detection_enabled: bool,
    pub flap_low_threshold: f64,
    pub flap_high_threshold: f64,
    pub freshness: FreshnessConfig,
    pub dynamic: bool,

    // -- runtime --
    pub current_state: HostState,
    pub last_state: HostState,
    pub last_hard_state: HostState,
    pub state_type: StateType,
    pub current_attempt: u32,
    pub last_check: Option<SystemTime>,
    pub next_check: Option<SystemTime>,
    pub last_state_change: Option<SystemTime>,
    pub last_hard_state_change: Option<SystemTime>,
    pub last_time_up: Option<SystemTime>,
    pub last_time_down: Option<SystemTime>,
    pub last_time_unreachable: Option<SystemTime>,
    pub plugin_output: String,
    pub long_output: String,
    pub perf_data: String,
    pub latency: Duration,
    pub execution_time: Duration,
    pub is_executing: bool,
    pub is_being_freshened: bool,
    pub flap: FlapHistory,
    pub scheduled_downtime_depth: u32,
    pub problem_acknowledged: bool,
    pub acknowledgement_type: AcknowledgementType,
    pub notified_on: HostNotifyOn,
    pub current_notification_number: u32,
    pub next_notification_time: Option<SystemTime>,
    pub first_problem_time: Option<SystemTime>,
    pub current_event_id: u64,
    pub current_problem_id: u64,
    pub last_seen: Option<SystemTime>,
    /// True once a check has returned at least one result (distinct from
    /// `Pending`, matching the legacy "has_been_checked" flag).
    pub has_been_checked: bool,
    /// Check-options carried on the most recently processed result, so
    /// result processing can tell a freshness-triggered result apart from
    /// an ordinary one (spec §4.9).
    pub last_check_options: CheckOptions,
    /// True when the most recently processed check was for an active
    /// check event dispatched by the scheduler (vs. a passive result),
    /// used to gate reachability refinement (spec §4.6.2).
    pub last_check_was_active: bool,
}

impl Host {
    /// Construct a new host with sane, inert defaults: `Pending`-equivalent
    /// state (modeled as `Up`/`Soft`/attempt 0) until the first check runs.
    pub fn new(name: impl Into<HostName>, check_command: impl Into<CommandName>) -> Self {
        Self {
            name: name.into(),
            alias: String::new(),
            address: String::new(),
            display_name: String::new(),
            check_command: check_command.into(),
            check_args: Vec::new(),
            active_checks_enabled: true,
            passive_checks_enabled: true,
            check_interval: 5.0,
            retry_interval: 1.0,
            max_check_attempts: 3,
            notification_options: HostNotifyOn::all(),
            check_period: None,
            parents: Vec::new(),
            flap_detection_enabled: false,
            flap_low_threshold: 20.0,
            flap_high_threshold: 30.0,
            freshness: FreshnessConfig::default(),
            dynamic: false,
            current_state: HostState::Up,
            last_state: HostState::Up,
            last_hard_state: HostState::Up,
            state_type: StateType::Hard,
            current_attempt: 1,
            last_check: None,
            next_check: None,
            last_state_change: None,
            last_hard_state_change: None,
            last_time_up: None,
            last_time_down: None,
            last_time_unreachable: None,
            plugin_output: String::new(),
            long_output: String::new(),
            perf_data: String::new(),
            latency: Duration::ZERO,
            execution_time: Duration::ZERO,
            is_executing: false,
            is_being_freshened: false,
            flap: FlapHistory::new(),
            scheduled_downtime_depth: 0,
            problem_acknowledged: false,
            acknowledgement_type: AcknowledgementType::None,
            notified_on: HostNotifyOn::empty(),
            current_notification_number: 0,
            next_notification_time: None,
            first_problem_time: None,
            current_event_id: 0,
            current_problem_id: 0,
            last_seen: None,
            has_been_checked: false,
            last_check_options: CheckOptions::empty(),
            last_check_was_active: true,
        }
    }

    /// Seconds between normal-interval checks (spec §4.5 window formula).
    pub fn normal_window(&self, interval_length_secs: f64) -> Duration {
        Duration::from_secs_f64((self.check_interval * interval_length_secs).max(0.0))
    }

    /// Seconds between retry-interval checks while SOFT.
    pub fn retry_window(&self, interval_length_secs: f64) -> Duration {
        Duration::from_secs_f64((self.retry_interval * interval_length_secs).max(0.0))
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
