// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service state machine: `handle_result` (spec §4.5).

use crate::output::{classify_service_state, parse_plugin_output};
use monitor_core::{
    AcknowledgementType, CheckOptions, CheckResult, CheckSubject, EngineCallbacks, EngineConfig,
    NotificationType, Service, ServiceState, StateType,
};
use std::time::Duration;

/// What the scheduler needs back after processing one service result: did
/// a HARD transition happen (for notification fan-out), and how far out
/// should the next check be scheduled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceResultOutcome {
    pub hard_change: bool,
    pub next_interval: Duration,
}

fn timeout_state_from_code(code: i32) -> ServiceState {
    match code {
        0 => ServiceState::Ok,
        1 => ServiceState::Warning,
        3 => ServiceState::Unknown,
        _ => ServiceState::Critical,
    }
}

/// Process one check result against `service`, mutating it in place and
/// firing `callbacks` for any notification-worthy transition.
///
/// `host_is_up` reflects the owning host's state *at the moment this
/// result is processed*, not when the check was dispatched.
pub fn handle_service_result(
    service: &mut Service,
    host_is_up: bool,
    result: &CheckResult,
    config: &EngineConfig,
    callbacks: &dyn EngineCallbacks,
) -> ServiceResultOutcome {
    service.is_executing = false;
    service.latency = result.latency;
    service.execution_time = result.execution_time;
    service.last_check = Some(result.finish_time);
    service.last_check_options = result.check_options;
    service.has_been_checked = true;
    if result.check_options.contains(CheckOptions::FRESHNESS_CHECK) {
        service.is_being_freshened = false;
    }

    let parsed = parse_plugin_output(&result.output);
    service.plugin_output = parsed.short;
    service.long_output = parsed.long;
    service.perf_data = parsed.perf;

    let timeout_state = timeout_state_from_code(config.service_check_timeout_state);
    let new_state = classify_service_state(
        result.return_code,
        result.early_timeout,
        result.exited_ok,
        timeout_state,
    );

    match new_state {
        ServiceState::Ok => service.last_time_ok = Some(result.finish_time),
        ServiceState::Warning => service.last_time_warning = Some(result.finish_time),
        ServiceState::Critical => service.last_time_critical = Some(result.finish_time),
        ServiceState::Unknown => service.last_time_unknown = Some(result.finish_time),
    }

    let prev_state = service.current_state;
    let prev_state_type = service.state_type;
    service.last_state = prev_state;
    let state_change = new_state != prev_state;
    let mut hard_change = false;

    if new_state == ServiceState::Ok {
        if prev_state != ServiceState::Ok {
            service.problem_acknowledged = false;
            service.acknowledgement_type = AcknowledgementType::None;
            service.next_notification_time = None;
            service.first_problem_time = None;
            service.state_type = StateType::Hard;
            service.current_attempt = 1;
            if prev_state_type == StateType::Hard {
                hard_change = true;
                callbacks.on_notification(&subject(service), NotificationType::Normal);
                service.current_notification_number = 0;
                service.notified_on = Default::default();
            }
        } else {
            service.state_type = StateType::Hard;
            service.current_attempt = 1;
        }
        service.host_problem_at_last_check = false;
    } else if !host_is_up {
        service.state_type = StateType::Hard;
        service.current_attempt = service.max_check_attempts.max(1);
        service.host_problem_at_last_check = true;
    } else if service.max_check_attempts <= 1 {
        service.state_type = StateType::Hard;
        service.current_attempt = service.max_check_attempts.max(1);
        if state_change || prev_state_type == StateType::Soft {
            hard_change = true;
            callbacks.on_notification(&subject(service), NotificationType::Normal);
        }
    } else if prev_state == ServiceState::Ok {
        service.state_type = StateType::Soft;
        service.current_attempt = 1;
    } else if prev_state_type == StateType::Soft {
        service.current_attempt = (service.current_attempt + 1).min(service.max_check_attempts);
        if service.current_attempt >= service.max_check_attempts {
            service.state_type = StateType::Hard;
            hard_change = true;
            callbacks.on_notification(&subject(service), NotificationType::Normal);
        }
    } else {
        service.current_attempt = service.max_check_attempts;
    }

    service.current_state = new_state;

    if state_change && service.acknowledgement_type != AcknowledgementType::Sticky {
        service.problem_acknowledged = false;
        service.acknowledgement_type = AcknowledgementType::None;
    }

    let hard_transition_between_problems = prev_state_type == StateType::Hard
        && new_state != prev_state
        && new_state != ServiceState::Ok
        && prev_state != ServiceState::Ok;
    if hard_change || hard_transition_between_problems {
        service.last_hard_state = new_state;
        service.last_hard_state_change = Some(result.finish_time);
    }
    if state_change {
        service.last_state_change = Some(result.finish_time);
    }

    if service.flap_detection_enabled {
        let recordable =
            (new_state == ServiceState::Ok && state_change) || (hard_change && new_state != ServiceState::Ok);
        if recordable {
            service.flap.record(new_state.code());
        }
        let was_flapping = service.flap.is_flapping;
        service
            .flap
            .update_hysteresis(service.flap_low_threshold, service.flap_high_threshold);
        if !was_flapping && service.flap.is_flapping {
            callbacks.on_notification(&subject(service), NotificationType::FlappingStart);
        } else if was_flapping && !service.flap.is_flapping {
            callbacks.on_notification(&subject(service), NotificationType::FlappingStop);
        }
    }

    let use_normal_window =
        new_state == ServiceState::Ok || service.state_type == StateType::Hard || service.host_problem_at_last_check;
    let next_interval = if use_normal_window {
        service.normal_window(config.interval_length)
    } else {
        service.retry_window(config.interval_length)
    };
    service.next_check = Some(result.finish_time + next_interval);

    if state_change || hard_change {
        callbacks.on_service_state_change(&subject(service), prev_state, new_state, hard_change);
    }

    ServiceResultOutcome {
        hard_change,
        next_interval,
    }
}

fn subject(service: &Service) -> CheckSubject {
    CheckSubject::service(service.key.host_name.as_str(), service.key.description.as_str())
}

#[cfg(test)]
#[path = "service_sm_tests.rs"]
mod tests;
