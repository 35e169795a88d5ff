// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The daemon's [`EngineCallbacks`] implementation: state changes and
//! notifications are logged via `tracing`; dependency propagation requests
//! are logged only, since the scheduler already enqueues the follow-up
//! check itself (spec §4.6.3) and this hook exists purely for external
//! observability (spec §6).

use monitor_core::{
    CheckOptions, CheckSubject, EngineCallbacks, HostState, NotificationType, ServiceState,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

#[derive(Debug, Default)]
pub struct TracingCallbacks {
    status_saves: AtomicU64,
    retention_saves: AtomicU64,
}

impl TracingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineCallbacks for TracingCallbacks {
    fn on_host_state_change(
        &self,
        subject: &CheckSubject,
        old_state: HostState,
        new_state: HostState,
        hard_change: bool,
    ) {
        tracing::info!(
            host = %subject.host_name,
            ?old_state,
            ?new_state,
            hard_change,
            "host state change"
        );
    }

    fn on_service_state_change(
        &self,
        subject: &CheckSubject,
        old_state: ServiceState,
        new_state: ServiceState,
        hard_change: bool,
    ) {
        tracing::info!(
            host = %subject.host_name,
            service = subject.service_description.as_deref().unwrap_or(""),
            ?old_state,
            ?new_state,
            hard_change,
            "service state change"
        );
    }

    fn on_notification(&self, subject: &CheckSubject, notification_type: NotificationType) {
        tracing::info!(
            host = %subject.host_name,
            service = subject.service_description.as_deref().unwrap_or(""),
            ?notification_type,
            "notification"
        );
    }

    fn schedule_host_check(&self, host_name: &str, when: SystemTime, options: CheckOptions) {
        tracing::debug!(host = host_name, ?when, ?options, "dependency propagation check scheduled");
    }

    fn on_status_save(&self) {
        self.status_saves.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("status snapshot point reached");
    }

    fn on_retention_save(&self) {
        self.retention_saves.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("retention snapshot point reached");
    }

    fn on_log_rotation(&self) {
        tracing::debug!("log rotation tick");
    }
}

#[cfg(test)]
#[path = "callbacks_tests.rs"]
mod tests;
