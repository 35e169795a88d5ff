// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Freshness supervisor (spec §4.9): detects objects whose last result is
//! older than their threshold allows and flags them for a forced check.

use monitor_core::{EngineConfig, Host, HostState, Service, ServiceState, StateType};
use std::time::{Duration, SystemTime};

fn effective_threshold(
    user_threshold: Option<u32>,
    normal_interval: f64,
    retry_interval: f64,
    is_soft_non_ok: bool,
    interval_length: f64,
    latency: Duration,
    additional_latency: Duration,
) -> Duration {
    if let Some(secs) = user_threshold {
        return Duration::from_secs(u64::from(secs));
    }
    let interval = if is_soft_non_ok { retry_interval } else { normal_interval };
    Duration::from_secs_f64((interval * interval_length).max(0.0)) + latency + additional_latency
}

fn expiration(
    last_check: Option<SystemTime>,
    event_start: SystemTime,
    threshold: Duration,
    active_checks_enabled: bool,
    has_user_threshold: bool,
    max_check_spread: Duration,
) -> SystemTime {
    match last_check {
        None => event_start + threshold,
        Some(last_check) => {
            let stale_after_outage = last_check < event_start
                && event_start
                    .duration_since(last_check)
                    .unwrap_or(Duration::ZERO)
                    > threshold.mul_f64(0.618);
            if stale_after_outage {
                event_start + threshold
            } else if active_checks_enabled && event_start > last_check && !has_user_threshold {
                event_start + threshold + max_check_spread
            } else {
                last_check + threshold
            }
        }
    }
}

/// Whether `host` is eligible for freshness evaluation at all (spec §4.9
/// "has either a configured threshold or a non-zero check interval").
fn host_eligible(host: &Host) -> bool {
    !host.is_executing
        && !host.is_being_freshened
        && host.freshness.check_freshness
        && (host.freshness.freshness_threshold.is_some() || host.check_interval > 0.0)
}

pub fn host_freshness_due(host: &Host, config: &EngineConfig, event_start: SystemTime, now: SystemTime) -> bool {
    if !host_eligible(host) {
        return false;
    }
    let is_soft_non_ok = host.state_type == StateType::Soft && host.current_state != HostState::Up;
    let threshold = effective_threshold(
        host.freshness.freshness_threshold,
        host.check_interval,
        host.retry_interval,
        is_soft_non_ok,
        config.interval_length,
        host.latency,
        config.additional_freshness_latency,
    );
    let expires_at = expiration(
        host.last_check,
        event_start,
        threshold,
        host.active_checks_enabled,
        host.freshness.freshness_threshold.is_some(),
        config.max_host_check_spread,
    );
    now > expires_at
}

fn service_eligible(service: &Service) -> bool {
    !service.is_executing
        && !service.is_being_freshened
        && service.freshness.check_freshness
        && (service.freshness.freshness_threshold.is_some() || service.check_interval > 0.0)
}

pub fn service_freshness_due(
    service: &Service,
    config: &EngineConfig,
    event_start: SystemTime,
    now: SystemTime,
) -> bool {
    if !service_eligible(service) {
        return false;
    }
    let is_soft_non_ok = service.state_type == StateType::Soft && service.current_state != ServiceState::Ok;
    let threshold = effective_threshold(
        service.freshness.freshness_threshold,
        service.check_interval,
        service.retry_interval,
        is_soft_non_ok,
        config.interval_length,
        service.latency,
        config.additional_freshness_latency,
    );
    let expires_at = expiration(
        service.last_check,
        event_start,
        threshold,
        service.active_checks_enabled,
        service.freshness.freshness_threshold.is_some(),
        config.max_service_check_spread,
    );
    now > expires_at
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
