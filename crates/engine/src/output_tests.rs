// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn splits_short_long_and_perfdata() {
    let raw = "All good | time=0.01s\nextra detail; still fine\nmore detail\n|rta=1;2;3 pl=0%";
    let parsed = parse_plugin_output(raw);
    assert_eq!(parsed.short, "All good");
    assert_eq!(parsed.long, "extra detail: still fine\\nmore detail");
    assert_eq!(parsed.perf, "time=0.01s rta=1;2;3 pl=0%");
}

#[test]
fn short_only_output_has_empty_long_and_perf() {
    let parsed = parse_plugin_output("OK - all checks passed");
    assert_eq!(parsed.short, "OK - all checks passed");
    assert_eq!(parsed.long, "");
    assert_eq!(parsed.perf, "");
}

#[test]
fn semicolons_survive_in_perfdata_but_not_short_text() {
    let parsed = parse_plugin_output("a;b | load=1;2;3");
    assert_eq!(parsed.short, "a:b");
    assert_eq!(parsed.perf, "load=1;2;3");
}

#[test]
fn service_return_codes_map_per_spec() {
    assert_eq!(
        classify_service_state(0, false, true, ServiceState::Unknown),
        ServiceState::Ok
    );
    assert_eq!(
        classify_service_state(1, false, true, ServiceState::Unknown),
        ServiceState::Warning
    );
    assert_eq!(
        classify_service_state(2, false, true, ServiceState::Unknown),
        ServiceState::Critical
    );
    assert_eq!(
        classify_service_state(3, false, true, ServiceState::Unknown),
        ServiceState::Unknown
    );
    assert_eq!(
        classify_service_state(127, false, true, ServiceState::Unknown),
        ServiceState::Critical
    );
    assert_eq!(
        classify_service_state(0, false, false, ServiceState::Unknown),
        ServiceState::Critical
    );
}

#[test]
fn early_timeout_overrides_to_the_configured_timeout_state() {
    assert_eq!(
        classify_service_state(0, true, true, ServiceState::Critical),
        ServiceState::Critical
    );
}

#[test]
fn host_return_codes_respect_aggressive_checking() {
    assert_eq!(classify_host_state_active(0, false, true, false), HostState::Up);
    assert_eq!(classify_host_state_active(1, false, true, false), HostState::Up);
    assert_eq!(classify_host_state_active(1, false, true, true), HostState::Down);
    assert_eq!(classify_host_state_active(2, false, true, false), HostState::Down);
}

#[test]
fn passive_host_codes_map_directly() {
    assert_eq!(classify_host_state_passive(0), HostState::Up);
    assert_eq!(classify_host_state_passive(1), HostState::Down);
    assert_eq!(classify_host_state_passive(2), HostState::Unreachable);
    assert_eq!(classify_host_state_passive(9), HostState::Unreachable);
}
