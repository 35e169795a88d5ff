// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn status_save_counter_increments() {
    let callbacks = TracingCallbacks::new();
    callbacks.on_status_save();
    callbacks.on_status_save();
    assert_eq!(callbacks.status_saves.load(Ordering::Relaxed), 2);
}

#[test]
fn callbacks_do_not_panic_on_a_host_subject() {
    let callbacks = TracingCallbacks::new();
    let subject = CheckSubject::host("web1");
    callbacks.on_host_state_change(&subject, HostState::Up, HostState::Down, true);
    callbacks.on_notification(&subject, NotificationType::Normal);
    callbacks.schedule_host_check("web1", SystemTime::now(), CheckOptions::DEPENDENCY_CHECK);
}
