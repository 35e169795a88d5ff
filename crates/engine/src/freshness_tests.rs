// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

fn epoch_plus(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn never_checked_service_expires_at_event_start_plus_threshold() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.freshness.check_freshness = true;
    service.check_interval = 1.0;
    let config = EngineConfig::default();

    let event_start = epoch_plus(1000);
    let threshold_secs = (1.0 * config.interval_length) as u64 + config.additional_freshness_latency.as_secs();

    assert!(!service_freshness_due(
        &service,
        &config,
        event_start,
        event_start + Duration::from_secs(threshold_secs - 1),
    ));
    assert!(service_freshness_due(
        &service,
        &config,
        event_start,
        event_start + Duration::from_secs(threshold_secs + 1),
    ));
}

#[test]
fn ineligible_objects_are_never_due() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.check_interval = 1.0;
    // check_freshness left false.
    let config = EngineConfig::default();
    assert!(!service_freshness_due(&service, &config, epoch_plus(0), epoch_plus(100_000)));

    service.freshness.check_freshness = true;
    service.is_executing = true;
    assert!(!service_freshness_due(&service, &config, epoch_plus(0), epoch_plus(100_000)));

    service.is_executing = false;
    service.is_being_freshened = true;
    assert!(!service_freshness_due(&service, &config, epoch_plus(0), epoch_plus(100_000)));
}

#[test]
fn golden_ratio_heuristic_caps_expiration_after_a_long_outage() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.freshness.check_freshness = true;
    service.freshness.freshness_threshold = Some(600);
    service.last_check = Some(epoch_plus(0));
    let config = EngineConfig::default();

    let event_start = epoch_plus(7200 + 300); // last_check is ~2h5m in the past
    assert!(!service_freshness_due(&service, &config, event_start, event_start + Duration::from_secs(599)));
    assert!(service_freshness_due(&service, &config, event_start, event_start + Duration::from_secs(601)));
}

#[test]
fn user_supplied_threshold_is_used_verbatim() {
    let mut host = Host::new("router1", "check_host_alive");
    host.freshness.check_freshness = true;
    host.freshness.freshness_threshold = Some(120);
    host.last_check = Some(epoch_plus(100));
    let config = EngineConfig::default();

    // last_check (100) + threshold (120) = 220; golden-ratio does not kick
    // in since event_start - last_check (50s) stays under 0.618 * 120.
    assert!(!host_freshness_due(&host, &config, epoch_plus(150), epoch_plus(219)));
    assert!(host_freshness_due(&host, &config, epoch_plus(150), epoch_plus(221)));
}

#[test]
fn soft_non_ok_uses_retry_interval_for_the_derived_threshold() {
    let mut service = Service::new("web1", "HTTP", "check_http");
    service.freshness.check_freshness = true;
    service.check_interval = 10.0;
    service.retry_interval = 1.0;
    service.state_type = StateType::Soft;
    service.current_state = ServiceState::Critical;
    let config = EngineConfig::default();

    let event_start = epoch_plus(1000);
    let retry_threshold_secs = (1.0 * config.interval_length) as u64 + config.additional_freshness_latency.as_secs();

    assert!(service_freshness_due(
        &service,
        &config,
        event_start,
        event_start + Duration::from_secs(retry_threshold_secs + 1),
    ));
}
