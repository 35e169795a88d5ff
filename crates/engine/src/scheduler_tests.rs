// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::{Duration, SystemTime};

fn epoch_plus(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn ordinary_ticks_are_not_a_time_jump() {
    assert!(!detect_time_jump(epoch_plus(1000), epoch_plus(1001)));
}

#[test]
fn a_backward_jump_past_thirty_seconds_is_detected() {
    assert!(!detect_time_jump(epoch_plus(1000), epoch_plus(971)));
    assert!(detect_time_jump(epoch_plus(1000), epoch_plus(969)));
}

#[test]
fn a_forward_jump_past_five_minutes_is_detected() {
    assert!(!detect_time_jump(epoch_plus(1000), epoch_plus(1000 + 299)));
    assert!(detect_time_jump(epoch_plus(1000), epoch_plus(1000 + 301)));
}

#[test]
fn nudge_stays_within_five_to_seventeen_seconds() {
    for _ in 0..200 {
        let d = nudge();
        assert!(d >= Duration::from_secs(5) && d <= Duration::from_secs(17), "{d:?} out of range");
    }
}

#[test]
fn an_absent_object_is_dropped_rather_than_requeued() {
    assert_eq!(
        decide_service_check(None, CheckOptions::empty(), 0, 256),
        EventDecision::Drop
    );
    assert_eq!(decide_host_check(None, CheckOptions::empty()), EventDecision::Drop);
}

#[test]
fn a_disabled_unforced_check_is_requeued_with_a_nudge() {
    assert_eq!(
        decide_service_check(Some(false), CheckOptions::empty(), 0, 256),
        EventDecision::RequeueWithNudge
    );
    assert_eq!(
        decide_host_check(Some(false), CheckOptions::empty()),
        EventDecision::RequeueWithNudge
    );
}

#[test]
fn a_forced_check_runs_even_when_disabled() {
    assert_eq!(
        decide_service_check(Some(false), CheckOptions::FORCE_EXECUTION, 0, 256),
        EventDecision::Run
    );
    assert_eq!(
        decide_host_check(Some(false), CheckOptions::FORCE_EXECUTION),
        EventDecision::Run
    );
}

#[test]
fn an_enabled_unforced_service_check_runs_unless_the_pool_is_saturated() {
    assert_eq!(
        decide_service_check(Some(true), CheckOptions::empty(), 10, 20),
        EventDecision::Run
    );
    assert_eq!(
        decide_service_check(Some(true), CheckOptions::empty(), 20, 20),
        EventDecision::RequeueWithNudge
    );
}

#[test]
fn pool_saturation_does_not_gate_forced_checks() {
    assert_eq!(
        decide_service_check(Some(true), CheckOptions::FORCE_EXECUTION, 999, 20),
        EventDecision::Run
    );
}

#[test]
fn a_check_with_no_next_check_scheduled_is_never_orphaned() {
    assert!(!is_orphaned(None, Duration::ZERO, Duration::from_secs(60), Duration::from_secs(10), epoch_plus(100_000)));
}

#[test]
fn a_check_past_its_next_check_plus_timeout_and_slack_is_orphaned() {
    let next_check = epoch_plus(1000);
    let latency = Duration::from_secs(1);
    let timeout = Duration::from_secs(60);
    let slack = Duration::from_secs(10);
    // expires at 1000 + 1 + 60 + 10 = 1071
    assert!(!is_orphaned(Some(next_check), latency, timeout, slack, epoch_plus(1070)));
    assert!(is_orphaned(Some(next_check), latency, timeout, slack, epoch_plus(1072)));
}
