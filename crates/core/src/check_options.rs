// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check-options bitmask carried on check events and results.
//!
//! Mirrors the legacy Nagios `CHECK_OPTION_*` bits: a forced or
//! freshness-triggered check bypasses the "is this object due" gate, and an
//! orphan re-check is tagged so result processing doesn't mistake it for a
//! duplicate dispatch.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct CheckOptions: u8 {
        /// Bypass `check_enabled`/period gating; run the check regardless.
        const FORCE_EXECUTION = 0b0001;
        /// This check was scheduled by the freshness supervisor.
        const FRESHNESS_CHECK = 0b0010;
        /// This check was re-scheduled by the orphan sweep.
        const ORPHAN_CHECK = 0b0100;
        /// This check was scheduled as parent/child dependency propagation.
        const DEPENDENCY_CHECK = 0b1000;
    }
}

#[cfg(test)]
#[path = "check_options_tests.rs"]
mod tests;
