// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service identity, configuration, and runtime state (spec §3).
//!
//! Shaped like [`crate::host::Host`] minus parents/reachability, plus a
//! back-pointer to the owning host and the extra per-state bookkeeping the
//! service state machine needs (spec §4.5).

use crate::check_options::CheckOptions;
use crate::command::CommandName;
use crate::flap::FlapHistory;
use crate::host::HostName;
use crate::timeperiod::TimeperiodName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

crate::define_id! {
    /// Free-text service description, unique per host.
    pub struct ServiceDescription;
}

/// The natural key of a service: `(host_name, service_description)`
/// (spec §3 invariant 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceKey {
    pub host_name: HostName,
    pub description: ServiceDescription,
}

impl ServiceKey {
    pub fn new(host_name: impl Into<HostName>, description: impl Into<ServiceDescription>) -> Self {
        Self {
            host_name: host_name.into(),
            description: description.into(),
        }
    }
}

/// Runtime health state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    pub fn is_ok(&self) -> bool {
        matches!(self, ServiceState::Ok)
    }

    /// Numeric code as carried by the flap history ring.
    pub fn code(&self) -> i8 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct ServiceNotifyOn: u8 {
        const WARNING  = 0b000001;
        const UNKNOWN  = 0b000010;
        const CRITICAL = 0b000100;
        const RECOVERY = 0b001000;
        const FLAPPING = 0b010000;
        const DOWNTIME = 0b100000;
    }
}

use crate::host::{AcknowledgementType, StateType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    // -- identity --
    pub key: ServiceKey,
    pub display_name: String,

    // -- configuration --
    pub check_command: CommandName,
    pub check_args: Vec<String>,
    pub active_checks_enabled: bool,
    pub passive_checks_enabled: bool,
    pub check_interval: f64,
    pub retry_interval: f64,
    pub max_check_attempts: u32,
    pub notification_options: ServiceNotifyOn,
    pub check_period: Option<TimeperiodName>,
    pub flap_detection_enabled: bool,
    pub flap_low_threshold: f64,
    pub flap_high_threshold: f64,
    pub freshness: crate::host::FreshnessConfig,
    pub dynamic: bool,
    pub is_volatile: bool,

    // -- runtime --
    pub current_state: ServiceState,
    pub last_state: ServiceState,
    pub last_hard_state: ServiceState,
    pub state_type: StateType,
    pub current_attempt: u32,
    pub last_check: Option<SystemTime>,
    pub next_check: Option<SystemTime>,
    pub last_state_change: Option<SystemTime>,
    pub last_hard_state_change: Option<SystemTime>,
    pub last_time_ok: Option<SystemTime>,
    pub last_time_warning: Option<SystemTime>,
    pub last_time_critical: Option<SystemTime>,
    pub last_time_unknown: Option<SystemTime>,
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
    pub notified_on: ServiceNotifyOn,
    pub current_notification_number: u32,
    pub next_notification_time: Option<SystemTime>,
    pub first_problem_time: Option<SystemTime>,
    pub current_event_id: u64,
    pub current_problem_id: u64,
    pub last_seen: Option<SystemTime>,
    pub has_been_checked: bool,
    /// True when the host owning this service was not Up at the moment
    /// this check's result was processed (spec §4.5 "host is not Up"
    /// branch); cleared on a recovery.
    pub host_problem_at_last_check: bool,
    pub last_check_options: CheckOptions,
}

impl Service {
    pub fn new(
        host_name: impl Into<HostName>,
        description: impl Into<ServiceDescription>,
        check_command: impl Into<CommandName>,
    ) -> Self {
        Self {
            key: ServiceKey::new(host_name, description),
            display_name: String::new(),
            check_command: check_command.into(),
            check_args: Vec::new(),
            active_checks_enabled: true,
            passive_checks_enabled: true,
            check_interval: 5.0,
            retry_interval: 1.0,
            max_check_attempts: 3,
            notification_options: ServiceNotifyOn::all(),
            check_period: None,
            flap_detection_enabled: false,
            flap_low_threshold: 20.0,
            flap_high_threshold: 30.0,
            freshness: crate::host::FreshnessConfig::default(),
            dynamic: false,
            is_volatile: false,
            current_state: ServiceState::Ok,
            last_state: ServiceState::Ok,
            last_hard_state: ServiceState::Ok,
            state_type: StateType::Hard,
            current_attempt: 1,
            last_check: None,
            next_check: None,
            last_state_change: None,
            last_hard_state_change: None,
            last_time_ok: None,
            last_time_warning: None,
            last_time_critical: None,
            last_time_unknown: None,
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
            notified_on: ServiceNotifyOn::empty(),
            current_notification_number: 0,
            next_notification_time: None,
            first_problem_time: None,
            current_event_id: 0,
            current_problem_id: 0,
            last_seen: None,
            has_been_checked: false,
            host_problem_at_last_check: false,
            last_check_options: CheckOptions::empty(),
        }
    }

    pub fn normal_window(&self, interval_length_secs: f64) -> Duration {
        Duration::from_secs_f64((self.check_interval * interval_length_secs).max(0.0))
    }

    pub fn retry_window(&self, interval_length_secs: f64) -> Duration {
        Duration::from_secs_f64((self.retry_interval * interval_length_secs).max(0.0))
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
