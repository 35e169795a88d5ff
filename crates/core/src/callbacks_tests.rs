// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingCallbacks {
    host_state_changes: Mutex<Vec<(HostState, HostState, bool)>>,
    service_state_changes: Mutex<Vec<(ServiceState, ServiceState, bool)>>,
    notifications: Mutex<Vec<NotificationType>>,
}

impl EngineCallbacks for RecordingCallbacks {
    fn on_host_state_change(
        &self,
        _subject: &CheckSubject,
        old_state: HostState,
        new_state: HostState,
        hard_change: bool,
    ) {
        self.host_state_changes
            .lock()
            .push((old_state, new_state, hard_change));
    }

    fn on_service_state_change(
        &self,
        _subject: &CheckSubject,
        old_state: ServiceState,
        new_state: ServiceState,
        hard_change: bool,
    ) {
        self.service_state_changes
            .lock()
            .push((old_state, new_state, hard_change));
    }

    fn on_notification(&self, _subject: &CheckSubject, notification_type: NotificationType) {
        self.notifications.lock().push(notification_type);
    }

    fn schedule_host_check(&self, _host_name: &str, _when: SystemTime, _options: CheckOptions) {}
}

#[test]
fn records_state_changes_and_notifications() {
    let callbacks = RecordingCallbacks::default();
    let subject = CheckSubject::host("router1");

    callbacks.on_host_state_change(&subject, HostState::Up, HostState::Down, true);
    callbacks.on_service_state_change(&subject, ServiceState::Ok, ServiceState::Critical, true);
    callbacks.on_notification(&subject, NotificationType::Normal);

    assert_eq!(callbacks.host_state_changes.lock().len(), 1);
    assert_eq!(callbacks.service_state_changes.lock().len(), 1);
    assert_eq!(callbacks.notifications.lock()[0], NotificationType::Normal);
}

#[test]
fn lifecycle_hooks_default_to_no_op() {
    let callbacks = RecordingCallbacks::default();
    callbacks.on_status_save();
    callbacks.on_retention_save();
    callbacks.on_log_rotation();
}
