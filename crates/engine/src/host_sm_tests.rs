// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use monitor_core::{CheckOptions, CheckResultBuilder, ServiceState};
use parking_lot::Mutex;
use std::time::SystemTime;

#[derive(Default)]
struct RecordingCallbacks {
    notifications: Mutex<Vec<NotificationType>>,
    host_changes: Mutex<Vec<(HostState, HostState, bool)>>,
}

impl EngineCallbacks for RecordingCallbacks {
    fn on_host_state_change(
        &self,
        _subject: &CheckSubject,
        old_state: HostState,
        new_state: HostState,
        hard_change: bool,
    ) {
        self.host_changes.lock().push((old_state, new_state, hard_change));
    }

    fn on_service_state_change(
        &self,
        _subject: &CheckSubject,
        _old_state: ServiceState,
        _new_state: ServiceState,
        _hard_change: bool,
    ) {
    }

    fn on_notification(&self, _subject: &CheckSubject, notification_type: NotificationType) {
        self.notifications.lock().push(notification_type);
    }

    fn schedule_host_check(&self, _host_name: &str, _when: SystemTime, _options: CheckOptions) {}
}

fn result(return_code: i32) -> CheckResult {
    CheckResultBuilder::new(CheckSubject::host("router1"), CheckType::Active)
        .return_code(return_code)
        .output("plugin output")
        .times(SystemTime::UNIX_EPOCH, SystemTime::UNIX_EPOCH)
        .build()
}

#[test]
fn pre_adjust_resets_attempt_for_a_currently_up_host() {
    let mut host = Host::new("router1", "check_host_alive");
    host.current_attempt = 1;
    pre_adjust_host_attempt(&mut host);
    assert_eq!(host.current_attempt, 1);
}

#[test]
fn pre_adjust_climbs_the_ladder_for_a_non_up_host() {
    let mut host = Host::new("router1", "check_host_alive");
    host.current_state = HostState::Down;
    host.max_check_attempts = 3;
    host.current_attempt = 1;
    pre_adjust_host_attempt(&mut host);
    assert_eq!(host.current_attempt, 2);
}

#[test]
fn no_parents_means_down_not_unreachable() {
    assert_eq!(determine_reachability(false, false), HostState::Down);
}

#[test]
fn an_up_parent_means_down() {
    assert_eq!(determine_reachability(true, true), HostState::Down);
}

#[test]
fn no_up_parent_means_unreachable() {
    assert_eq!(determine_reachability(true, false), HostState::Unreachable);
}

#[test]
fn first_failure_with_no_parents_goes_hard_down_through_reachability() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);

    assert_eq!(host.current_state, HostState::Down);
    assert_eq!(host.state_type, StateType::Hard);
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 1);
}

#[test]
fn unreachable_host_behind_a_down_parent() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_host_result(&mut host, &result(2), &config, true, false, &callbacks);

    assert_eq!(host.current_state, HostState::Unreachable);
}

#[test]
fn soft_ladder_climbs_to_hard_and_notifies_at_max_attempts() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 3;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);
    handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);
    let outcome = handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);

    assert_eq!(host.current_attempt, 3);
    assert_eq!(host.state_type, StateType::Hard);
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 1);
}

#[test]
fn recovery_from_hard_problem_notifies_and_resets_attempt() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);
    let outcome = handle_host_result(&mut host, &result(0), &config, false, false, &callbacks);

    assert_eq!(host.current_state, HostState::Up);
    assert_eq!(host.current_attempt, 1);
    assert!(outcome.recovered());
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 2);
}

#[test]
fn passive_untranslated_check_goes_immediately_hard() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 5;
    let callbacks = RecordingCallbacks::default();
    let mut config = EngineConfig::default();
    config.translate_passive_host_checks = false;

    let mut passive = result(1);
    passive.check_type = CheckType::Passive;
    let outcome = handle_host_result(&mut host, &passive, &config, false, false, &callbacks);

    assert_eq!(host.current_state, HostState::Down);
    assert_eq!(host.state_type, StateType::Hard);
    assert!(outcome.hard_change);
}

#[test]
fn went_non_up_reports_a_departure_from_up() {
    let mut host = Host::new("router1", "check_host_alive");
    host.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_host_result(&mut host, &result(2), &config, false, false, &callbacks);
    assert!(outcome.went_non_up());
}
