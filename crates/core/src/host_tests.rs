// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_host_starts_pending_like_and_up() {
    let host = Host::new("web01", "check-ping");
    assert_eq!(host.current_state, HostState::Up);
    assert_eq!(host.state_type, StateType::Hard);
    assert!(!host.has_been_checked);
    assert_eq!(host.current_attempt, 1);
    assert!(host.parents.is_empty());
}

#[test]
fn normal_and_retry_windows_scale_by_interval_length() {
    let mut host = Host::new("web01", "check-ping");
    host.check_interval = 5.0;
    host.retry_interval = 1.0;

    assert_eq!(host.normal_window(60.0), Duration::from_secs(300));
    assert_eq!(host.retry_window(60.0), Duration::from_secs(60));
}

#[test]
fn host_name_compares_against_str() {
    let host = Host::new("web01", "check-ping");
    assert_eq!(host.name, "web01");
}
