// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler event types: the payload held in the event queue's min-heap.

use crate::check_options::CheckOptions;
use crate::check_result::CheckSubject;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

crate::define_id! {
    /// Opaque per-event token used only for log correlation.
    pub struct EventId;
}

/// What kind of action an [`Event`] represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    ServiceCheck {
        subject: CheckSubject,
        options: CheckOptions,
    },
    HostCheck {
        subject: CheckSubject,
        options: CheckOptions,
    },
    StatusSave,
    RetentionSave,
    LogRotation,
    ServiceFreshness,
    HostFreshness,
    OrphanSweep,
    /// No-op in an in-process design: results arrive on the result channel
    /// directly, so the reaper has nothing to poll. Kept so the dispatch
    /// table matches the spec's component list 1:1.
    Reaper,
    /// Fired by the dynamic registry's own periodic prune tick.
    DynamicPrune,
}

/// A scheduled future action held in the scheduler's min-heap.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub run_time: Instant,
    pub recurring_interval: Option<Duration>,
    /// Higher priority events sort earlier among events with an equal
    /// `run_time`.
    pub priority: i32,
}

impl Event {
    pub fn new(kind: EventKind, run_time: Instant) -> Self {
        Self {
            kind,
            run_time,
            recurring_interval: None,
            priority: 0,
        }
    }

    pub fn recurring(mut self, interval: Duration) -> Self {
        self.recurring_interval = Some(interval);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn subject(&self) -> Option<&CheckSubject> {
        match &self.kind {
            EventKind::ServiceCheck { subject, .. } | EventKind::HostCheck { subject, .. } => {
                Some(subject)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
