// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_service_starts_ok_and_hard() {
    let svc = Service::new("web01", "HTTP", "check-http");
    assert_eq!(svc.current_state, ServiceState::Ok);
    assert_eq!(svc.state_type, StateType::Hard);
    assert!(!svc.has_been_checked);
    assert_eq!(svc.key.host_name, "web01");
    assert_eq!(svc.key.description, "HTTP");
}

#[test]
fn service_state_codes_are_distinct() {
    let codes = [
        ServiceState::Ok.code(),
        ServiceState::Warning.code(),
        ServiceState::Critical.code(),
        ServiceState::Unknown.code(),
    ];
    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), 4);
}

#[test]
fn windows_scale_by_interval_length() {
    let mut svc = Service::new("web01", "HTTP", "check-http");
    svc.check_interval = 2.0;
    svc.retry_interval = 0.5;
    assert_eq!(svc.normal_window(60.0), Duration::from_secs(120));
    assert_eq!(svc.retry_window(60.0), Duration::from_secs(30));
}
