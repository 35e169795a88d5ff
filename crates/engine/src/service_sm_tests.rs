// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use monitor_core::{CheckOptions, CheckResultBuilder, CheckType, HostState};
use parking_lot::Mutex;
use std::time::SystemTime;

#[derive(Default)]
struct RecordingCallbacks {
    notifications: Mutex<Vec<NotificationType>>,
    service_changes: Mutex<Vec<(ServiceState, ServiceState, bool)>>,
}

impl EngineCallbacks for RecordingCallbacks {
    fn on_host_state_change(
        &self,
        _subject: &CheckSubject,
        _old_state: HostState,
        _new_state: HostState,
        _hard_change: bool,
    ) {
    }

    fn on_service_state_change(
        &self,
        _subject: &CheckSubject,
        old_state: ServiceState,
        new_state: ServiceState,
        hard_change: bool,
    ) {
        self.service_changes.lock().push((old_state, new_state, hard_change));
    }

    fn on_notification(&self, _subject: &CheckSubject, notification_type: NotificationType) {
        self.notifications.lock().push(notification_type);
    }

    fn schedule_host_check(&self, _host_name: &str, _when: SystemTime, _options: CheckOptions) {}
}

fn result(return_code: i32) -> CheckResult {
    CheckResultBuilder::new(CheckSubject::service("web1", "HTTP"), CheckType::Active)
        .return_code(return_code)
        .output("plugin output")
        .times(SystemTime::UNIX_EPOCH, SystemTime::UNIX_EPOCH)
        .build()
}

#[test]
fn first_failure_enters_soft_at_attempt_one() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 3;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_service_result(&mut service, true, &result(2), &config, &callbacks);

    assert_eq!(service.current_state, ServiceState::Critical);
    assert_eq!(service.state_type, StateType::Soft);
    assert_eq!(service.current_attempt, 1);
    assert!(!outcome.hard_change);
    assert!(callbacks.notifications.lock().is_empty());
}

#[test]
fn soft_ladder_climbs_to_hard_and_notifies_at_max_attempts() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 3;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_service_result(&mut service, true, &result(2), &config, &callbacks); // attempt 1, soft
    handle_service_result(&mut service, true, &result(2), &config, &callbacks); // attempt 2, soft
    let outcome = handle_service_result(&mut service, true, &result(2), &config, &callbacks); // attempt 3, hard

    assert_eq!(service.current_attempt, 3);
    assert_eq!(service.state_type, StateType::Hard);
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 1);
}

#[test]
fn single_attempt_threshold_goes_hard_on_the_first_result() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_service_result(&mut service, true, &result(2), &config, &callbacks);

    assert_eq!(service.current_state, ServiceState::Critical);
    assert_eq!(service.state_type, StateType::Hard);
    assert_eq!(service.current_attempt, 1);
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 1);
}

#[test]
fn continued_hard_problem_does_not_renotify() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_service_result(&mut service, true, &result(2), &config, &callbacks);
    assert_eq!(callbacks.notifications.lock().len(), 1);

    let outcome = handle_service_result(&mut service, true, &result(2), &config, &callbacks);
    assert!(!outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 1);
}

#[test]
fn recovery_from_hard_problem_notifies_and_resets_attempt() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 1;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_service_result(&mut service, true, &result(2), &config, &callbacks);
    let outcome = handle_service_result(&mut service, true, &result(0), &config, &callbacks);

    assert_eq!(service.current_state, ServiceState::Ok);
    assert_eq!(service.current_attempt, 1);
    assert_eq!(service.current_notification_number, 0);
    assert!(outcome.hard_change);
    assert_eq!(callbacks.notifications.lock().len(), 2); // problem + recovery
}

#[test]
fn recovery_from_soft_problem_is_silent() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 3;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_service_result(&mut service, true, &result(2), &config, &callbacks); // soft attempt 1
    let outcome = handle_service_result(&mut service, true, &result(0), &config, &callbacks); // recovers before hard

    assert_eq!(service.current_state, ServiceState::Ok);
    assert_eq!(service.state_type, StateType::Hard);
    assert!(!outcome.hard_change);
    assert!(callbacks.notifications.lock().is_empty());
}

#[test]
fn host_down_forces_immediate_hard_without_notifying() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 3;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_service_result(&mut service, false, &result(2), &config, &callbacks);

    assert_eq!(service.state_type, StateType::Hard);
    assert_eq!(service.current_attempt, 3);
    assert!(service.host_problem_at_last_check);
    assert!(!outcome.hard_change);
    assert!(callbacks.notifications.lock().is_empty());
}

#[test]
fn flap_detection_only_records_recoveries_and_hard_entries() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 1;
    service.flap_detection_enabled = true;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    handle_service_result(&mut service, true, &result(2), &config, &callbacks);
    assert_eq!(service.flap.index(), 1);
    handle_service_result(&mut service, true, &result(0), &config, &callbacks);
    assert_eq!(service.flap.index(), 2);
}

#[test]
fn next_check_uses_retry_window_while_soft() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.max_check_attempts = 3;
    service.check_interval = 5.0;
    service.retry_interval = 1.0;
    let callbacks = RecordingCallbacks::default();
    let config = EngineConfig::default();

    let outcome = handle_service_result(&mut service, true, &result(2), &config, &callbacks);
    assert_eq!(outcome.next_interval, service.retry_window(config.interval_length));
}
