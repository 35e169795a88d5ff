// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-wide tunables consumed by the scheduler and state machines
//! (spec §6). This is a read-only view built once at startup; the core
//! never mutates it.

use crate::CommandName;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds represented by one "interval unit" on check/retry intervals.
    pub interval_length: f64,
    pub service_check_timeout: Duration,
    pub host_check_timeout: Duration,
    /// Return code substituted when a service check times out.
    pub service_check_timeout_state: i32,
    /// Treat passive host checks as going through the SOFT ladder instead
    /// of immediate HARD (spec §4.6 "Passive-host checks default to
    /// immediate HARD unless...").
    pub translate_passive_host_checks: bool,
    pub use_aggressive_host_checking: bool,
    /// Use current state (not last-hard-state) for dependency evaluation
    /// even while the master is SOFT (spec §4.8).
    pub soft_state_dependencies: bool,
    pub additional_freshness_latency: Duration,
    pub max_service_check_spread: Duration,
    pub max_host_check_spread: Duration,
    pub check_reaper_interval: Duration,
    pub orphan_check_interval: Duration,
    pub service_freshness_check_interval: Duration,
    pub host_freshness_check_interval: Duration,
    pub auto_reschedule_enabled: bool,
    pub auto_reschedule_interval: Duration,
    /// TTL after which an unconfirmed dynamic host/service is pruned.
    pub dynamic_object_ttl: Duration,
    /// How often the dynamic registry prune sweep runs.
    pub dynamic_prune_interval: Duration,
    pub nrdp_enabled: bool,
    pub nrdp_listen_addr: String,
    pub nrdp_path: String,
    pub nrdp_dynamic_register: bool,
    /// Loopback (127.0.0.1/::1) requests skip token auth.
    pub nrdp_loopback_bypass: bool,
    /// Placeholder check command assigned to hosts/services created by
    /// dynamic registration (spec §4.11) — never actually executed, since
    /// auto-registered objects have active checks disabled.
    pub dynamic_default_command: CommandName,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_length: 60.0,
            service_check_timeout: Duration::from_secs(60),
            host_check_timeout: Duration::from_secs(30),
            service_check_timeout_state: 2,
            translate_passive_host_checks: false,
            use_aggressive_host_checking: false,
            soft_state_dependencies: false,
            additional_freshness_latency: Duration::from_secs(15),
            max_service_check_spread: Duration::from_secs(30 * 60),
            max_host_check_spread: Duration::from_secs(30 * 60),
            check_reaper_interval: Duration::from_secs(10),
            orphan_check_interval: Duration::from_secs(60),
            service_freshness_check_interval: Duration::from_secs(60),
            host_freshness_check_interval: Duration::from_secs(60),
            auto_reschedule_enabled: false,
            auto_reschedule_interval: Duration::from_secs(30),
            dynamic_object_ttl: Duration::from_secs(3600),
            dynamic_prune_interval: Duration::from_secs(300),
            nrdp_enabled: true,
            nrdp_listen_addr: "0.0.0.0:5668".to_string(),
            nrdp_path: "/nrdp".to_string(),
            nrdp_dynamic_register: true,
            nrdp_loopback_bypass: true,
            dynamic_default_command: CommandName::new("dynamic-passive-placeholder"),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
