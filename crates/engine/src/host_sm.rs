// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host state machine (spec §4.6). Shares the shape of the service state
//! machine but differs in three ways: attempt pre-adjustment happens
//! before dispatch rather than after, non-Up states are refined through
//! parent topology, and state changes trigger parent/child cross-checks.

use crate::output::{classify_host_state_active, classify_host_state_passive, parse_plugin_output};
use monitor_core::{
    AcknowledgementType, CheckOptions, CheckResult, CheckSubject, CheckType, EngineCallbacks,
    EngineConfig, Host, HostState, NotificationType, StateType,
};
use std::time::Duration;

/// Reset the attempt ladder before an active check runs: an active check
/// on a currently-Up host restarts the ladder, anything else climbs it.
pub fn pre_adjust_host_attempt(host: &mut Host) {
    if host.current_state.is_up() {
        host.current_attempt = 1;
    } else {
        host.current_attempt = (host.current_attempt + 1).min(host.max_check_attempts.max(1));
    }
}

/// Refine a non-Up state using parent topology (spec §4.6.2).
pub fn determine_reachability(host_has_parents: bool, any_parent_up: bool) -> HostState {
    if !host_has_parents || any_parent_up {
        HostState::Down
    } else {
        HostState::Unreachable
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostResultOutcome {
    pub prev_state: HostState,
    pub new_state: HostState,
    pub hard_change: bool,
    pub next_interval: Duration,
}

impl HostResultOutcome {
    pub fn went_non_up(&self) -> bool {
        self.prev_state.is_up() && !self.new_state.is_up()
    }

    pub fn recovered(&self) -> bool {
        !self.prev_state.is_up() && self.new_state.is_up()
    }
}

pub fn handle_host_result(
    host: &mut Host,
    result: &CheckResult,
    config: &EngineConfig,
    host_has_parents: bool,
    any_parent_up: bool,
    callbacks: &dyn EngineCallbacks,
) -> HostResultOutcome {
    host.is_executing = false;
    host.latency = result.latency;
    host.execution_time = result.execution_time;
    host.last_check = Some(result.finish_time);
    host.last_check_options = result.check_options;
    host.last_check_was_active = result.check_type == CheckType::Active;
    host.has_been_checked = true;
    if result.check_options.contains(CheckOptions::FRESHNESS_CHECK) {
        host.is_being_freshened = false;
    }

    let parsed = parse_plugin_output(&result.output);
    host.plugin_output = parsed.short;
    host.long_output = parsed.long;
    host.perf_data = parsed.perf;

    let mut new_state = match result.check_type {
        CheckType::Active => classify_host_state_active(
            result.return_code,
            result.early_timeout,
            result.exited_ok,
            config.use_aggressive_host_checking,
        ),
        CheckType::Passive => classify_host_state_passive(result.return_code),
    };

    let refine = result.check_type == CheckType::Active
        || (result.check_type == CheckType::Passive && config.translate_passive_host_checks);
    if refine && !new_state.is_up() {
        new_state = determine_reachability(host_has_parents, any_parent_up);
    }

    match new_state {
        HostState::Up => host.last_time_up = Some(result.finish_time),
        HostState::Down => host.last_time_down = Some(result.finish_time),
        HostState::Unreachable => host.last_time_unreachable = Some(result.finish_time),
    }

    let prev_state = host.current_state;
    let prev_state_type = host.state_type;
    host.last_state = prev_state;
    let state_change = new_state != prev_state;
    let mut hard_change = false;

    let subject = CheckSubject::host(host.name.as_str());
    let passive_untranslated =
        result.check_type == CheckType::Passive && !config.translate_passive_host_checks;

    if new_state.is_up() {
        if !prev_state.is_up() {
            host.problem_acknowledged = false;
            host.acknowledgement_type = AcknowledgementType::None;
            host.next_notification_time = None;
            host.first_problem_time = None;
            host.state_type = StateType::Hard;
            host.current_attempt = 1;
            if prev_state_type == StateType::Hard {
                hard_change = true;
                callbacks.on_notification(&subject, NotificationType::Normal);
                host.current_notification_number = 0;
                host.notified_on = Default::default();
            }
        } else {
            host.state_type = StateType::Hard;
            host.current_attempt = 1;
        }
    } else if passive_untranslated || host.max_check_attempts <= 1 {
        host.state_type = StateType::Hard;
        host.current_attempt = host.max_check_attempts.max(1);
        if state_change || prev_state_type == StateType::Soft {
            hard_change = true;
            callbacks.on_notification(&subject, NotificationType::Normal);
        }
    } else if prev_state.is_up() {
        host.state_type = StateType::Soft;
        host.current_attempt = 1;
    } else if prev_state_type == StateType::Soft {
        host.current_attempt = (host.current_attempt + 1).min(host.max_check_attempts);
        if host.current_attempt >= host.max_check_attempts {
            host.state_type = StateType::Hard;
            hard_change = true;
            callbacks.on_notification(&subject, NotificationType::Normal);
        }
    } else {
        host.current_attempt = host.max_check_attempts;
    }

    host.current_state = new_state;

    if state_change && host.acknowledgement_type != AcknowledgementType::Sticky {
        host.problem_acknowledged = false;
        host.acknowledgement_type = AcknowledgementType::None;
    }

    let hard_transition_between_problems = prev_state_type == StateType::Hard
        && new_state != prev_state
        && !new_state.is_up()
        && !prev_state.is_up();
    if hard_change || hard_transition_between_problems {
        host.last_hard_state = new_state;
        host.last_hard_state_change = Some(result.finish_time);
    }
    if state_change {
        host.last_state_change = Some(result.finish_time);
    }

    if host.flap_detection_enabled {
        host.flap.record(new_state_code(new_state));
        let was_flapping = host.flap.is_flapping;
        host.flap
            .update_hysteresis(host.flap_low_threshold, host.flap_high_threshold);
        if !was_flapping && host.flap.is_flapping {
            callbacks.on_notification(&subject, NotificationType::FlappingStart);
        } else if was_flapping && !host.flap.is_flapping {
            callbacks.on_notification(&subject, NotificationType::FlappingStop);
        }
    }

    let use_normal_window = new_state.is_up() || host.state_type == StateType::Hard;
    let next_interval = if use_normal_window {
        host.normal_window(config.interval_length)
    } else {
        host.retry_window(config.interval_length)
    };
    host.next_check = Some(result.finish_time + next_interval);

    if state_change || hard_change {
        callbacks.on_host_state_change(&subject, prev_state, new_state, hard_change);
    }

    HostResultOutcome {
        prev_state,
        new_state,
        hard_change,
        next_interval,
    }
}

fn new_state_code(state: HostState) -> i8 {
    match state {
        HostState::Up => 0,
        HostState::Down => 1,
        HostState::Unreachable => 2,
    }
}

#[cfg(test)]
#[path = "host_sm_tests.rs"]
mod tests;
