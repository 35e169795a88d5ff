// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification escalations (spec §3). The core only carries the
//! definition; escalation *viability* is decided by the notification
//! dispatch engine, an external collaborator (spec §1).

use crate::check_result::CheckSubject;
use crate::timeperiod::TimeperiodName;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::time::Duration;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct EscalationOptions: u8 {
        const WARNING  = 0b0001;
        const CRITICAL = 0b0010;
        const UNKNOWN  = 0b0100;
        const RECOVERY = 0b1000;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub subject: CheckSubject,
    pub contacts: Vec<String>,
    pub contact_groups: Vec<String>,
    pub first_notification: u32,
    pub last_notification: u32,
    pub options: EscalationOptions,
    pub period: Option<TimeperiodName>,
    pub override_notification_interval: Option<Duration>,
}

impl Escalation {
    /// Whether this escalation applies at the given notification number.
    /// `last_notification == 0` means "applies indefinitely once reached".
    pub fn applies_at(&self, notification_number: u32) -> bool {
        notification_number >= self.first_notification
            && (self.last_notification == 0 || notification_number <= self.last_notification)
    }
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
