// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time periods: 7-day-indexed time ranges with recursive exclusions and
//! calendar exceptions, used to gate checks, notifications, and dependency
//! evaluation to a window of "valid" time.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

crate::define_id! {
    /// Unique name of a timeperiod definition.
    pub struct TimeperiodName;
}

/// An `HH:MM-HH:MM` range, stored as minutes-of-day for cheap containment
/// checks. A range that wraps past midnight (`end < start`) is valid and
/// spans into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timerange {
    pub start_minutes: u16,
    pub end_minutes: u16,
}

impl Timerange {
    pub fn new(start_minutes: u16, end_minutes: u16) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    fn contains_minute_of_day(&self, minute: u16) -> bool {
        if self.end_minutes >= self.start_minutes {
            minute >= self.start_minutes && minute < self.end_minutes
        } else {
            // Wraps past midnight.
            minute >= self.start_minutes || minute < self.end_minutes
        }
    }
}

/// A single point in time resolved to day-of-week and minute-of-day, in
/// whatever timezone the caller supplies (the core treats all times as a
/// single reference frame; timezone handling is an external concern).
#[derive(Debug, Clone, Copy)]
pub struct Timepoint {
    /// 0 = Sunday .. 6 = Saturday, matching the classic Nagios convention.
    pub weekday: u8,
    pub minute_of_day: u16,
    /// Calendar date key, `"MM-DD"`, used to match exceptions.
    pub date_key: String,
}

impl Timepoint {
    /// Derive a [`Timepoint`] from a Unix timestamp, treating it as UTC.
    pub fn from_unix(secs: u64) -> Self {
        let dt = DateTime::<Utc>::from_timestamp(secs as i64, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        // 0 = Sunday .. 6 = Saturday, matching the classic Nagios convention.
        let weekday = dt.weekday().num_days_from_sunday() as u8;
        let minute_of_day = (dt.num_seconds_from_midnight() / 60) as u16;

        Timepoint {
            weekday,
            minute_of_day,
            date_key: format!("{:02}-{:02}", dt.month(), dt.day()),
        }
    }

    pub fn from_system_time(t: SystemTime) -> Self {
        let secs = t.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_secs();
        Self::from_unix(secs)
    }
}

/// Named time window used to gate checks, notifications, and dependency
/// evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeperiod {
    pub name: TimeperiodName,
    /// Ranges indexed by weekday, 0 = Sunday .. 6 = Saturday.
    pub week: [Vec<Timerange>; 7],
    /// Other timeperiods this one recursively excludes (a time is *not*
    /// valid if it falls inside an excluded period).
    pub exclusions: Vec<TimeperiodName>,
    /// Calendar-date exceptions (`"MM-DD"`) overriding the weekly ranges
    /// for that day.
    pub exceptions: HashMap<String, Vec<Timerange>>,
}

impl Timeperiod {
    pub fn new(name: impl Into<TimeperiodName>) -> Self {
        Self {
            name: name.into(),
            week: Default::default(),
            exclusions: Vec::new(),
            exceptions: HashMap::new(),
        }
    }

    /// Whether `point` falls inside this period, ignoring exclusions. Used
    /// internally; external callers should use
    /// [`Timeperiod::contains_with_exclusions`].
    fn contains_self(&self, point: &Timepoint) -> bool {
        if let Some(ranges) = self.exceptions.get(&point.date_key) {
            return ranges.iter().any(|r| r.contains_minute_of_day(point.minute_of_day));
        }
        self.week[point.weekday as usize]
            .iter()
            .any(|r| r.contains_minute_of_day(point.minute_of_day))
    }

    /// Whether `point` is valid time for this period: inside its own ranges
    /// and not inside any (recursively resolved) excluded period.
    ///
    /// `lookup` resolves an exclusion name to its definition; a cycle-safe
    /// visited set prevents infinite recursion if periods mutually exclude
    /// each other (configuration is assumed acyclic, but the core does not
    /// trust that blindly).
    pub fn contains_with_exclusions(
        &self,
        point: &Timepoint,
        lookup: &impl Fn(&TimeperiodName) -> Option<Timeperiod>,
    ) -> bool {
        if !self.contains_self(point) {
            return false;
        }
        let mut visited = std::collections::HashSet::new();
        !self.excluded(point, lookup, &mut visited)
    }

    fn excluded(
        &self,
        point: &Timepoint,
        lookup: &impl Fn(&TimeperiodName) -> Option<Timeperiod>,
        visited: &mut std::collections::HashSet<TimeperiodName>,
    ) -> bool {
        for name in &self.exclusions {
            if !visited.insert(name.clone()) {
                continue;
            }
            if let Some(excluded_period) = lookup(name) {
                if excluded_period.contains_self(point)
                    && !excluded_period.excluded(point, lookup, visited)
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "timeperiod_tests.rs"]
mod tests;
