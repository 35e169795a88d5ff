// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External collaborator interfaces consumed by the state machines and
//! the scheduler (spec §6). These are narrow, synchronous traits: the
//! core calls out to them while already holding the object-graph write
//! lock, so implementations must not block or re-enter the graph.

use crate::check_options::CheckOptions;
use crate::check_result::CheckSubject;
use crate::host::HostState;
use crate::notification::NotificationType;
use crate::service::ServiceState;
use std::time::SystemTime;

/// State-change and notification hooks fired from the host and service
/// state machines, plus the scheduler's periodic lifecycle hand-offs.
///
/// A panicking implementation must never take down monitoring: callers are
/// expected to wrap invocations the way the scheduler wraps its event loop
/// (catch, log, continue).
pub trait EngineCallbacks: Send + Sync {
    /// Fired on `state_change || hard_change` from the host state machine
    /// (spec §4.6).
    fn on_host_state_change(
        &self,
        subject: &CheckSubject,
        old_state: HostState,
        new_state: HostState,
        hard_change: bool,
    );

    /// Fired on `state_change || hard_change` from the service state
    /// machine (spec §4.5).
    fn on_service_state_change(
        &self,
        subject: &CheckSubject,
        old_state: ServiceState,
        new_state: ServiceState,
        hard_change: bool,
    );

    /// Fired from state machines on recoveries and hard problem entries.
    fn on_notification(&self, subject: &CheckSubject, notification_type: NotificationType);

    /// Used by result processing to enqueue parent/child dependency
    /// propagation checks (spec §4.6.3).
    fn schedule_host_check(&self, host_name: &str, when: SystemTime, options: CheckOptions);

    fn on_status_save(&self) {}
    fn on_retention_save(&self) {}
    fn on_log_rotation(&self) {}
}

/// Read-only host lookup, used by macro expansion (an external
/// collaborator whose signature the core fixes but does not implement).
pub trait HostLookup: Send + Sync {
    fn host_lookup(&self, name: &str) -> Option<crate::host::Host>;
}

/// Read-only service lookup, keyed by `(host_name, description)`.
pub trait ServiceLookup: Send + Sync {
    fn service_lookup(&self, host_name: &str, description: &str) -> Option<crate::service::Service>;
}

#[cfg(test)]
#[path = "callbacks_tests.rs"]
mod tests;
