// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-to-host and service-to-service dependency edges (spec §3, §4.8).

use crate::check_result::CheckSubject;
use crate::timeperiod::TimeperiodName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// States that make a dependency "failed" when the master is in them.
    /// The same bits are reused for hosts (`DOWN`/`UNREACHABLE`) and
    /// services (`WARNING`/`UNKNOWN`/`CRITICAL`) — a given [`Dependency`]
    /// only ever sets the bits relevant to its master's kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct DependencyMask: u8 {
        const WARNING     = 0b00001;
        const UNKNOWN      = 0b00010;
        const CRITICAL     = 0b00100;
        const DOWN         = 0b01000;
        const UNREACHABLE  = 0b10000;
    }
}

/// Which kind of dependency check is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Notification,
    Execution,
}

/// A master→dependent edge. `dependent` is the object whose notifications
/// or execution are gated on `master`'s state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub master: CheckSubject,
    pub dependent: CheckSubject,
    pub notification_failure_mask: DependencyMask,
    pub execution_failure_mask: DependencyMask,
    /// If true, a failed dependency against the master also checks the
    /// master's own dependency edges.
    pub inherits_parent: bool,
    pub dependency_period: Option<TimeperiodName>,
}

impl Dependency {
    pub fn mask_for(&self, kind: DependencyKind) -> DependencyMask {
        match kind {
            DependencyKind::Notification => self.notification_failure_mask,
            DependencyKind::Execution => self.execution_failure_mask,
        }
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
