// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn simple_range_contains_business_hours() {
    let mut tp = Timeperiod::new("24x7");
    for day in 0..7 {
        tp.week[day] = vec![Timerange::new(0, 24 * 60)];
    }
    let point = Timepoint {
        weekday: 3,
        minute_of_day: 9 * 60,
        date_key: "01-01".into(),
    };
    assert!(tp.contains_with_exclusions(&point, &|_| None));
}

#[test]
fn range_excludes_before_start_and_after_end() {
    let mut tp = Timeperiod::new("office");
    tp.week[1] = vec![Timerange::new(9 * 60, 17 * 60)];

    let before = Timepoint {
        weekday: 1,
        minute_of_day: 8 * 60,
        date_key: "x".into(),
    };
    let during = Timepoint {
        weekday: 1,
        minute_of_day: 12 * 60,
        date_key: "x".into(),
    };
    let after = Timepoint {
        weekday: 1,
        minute_of_day: 18 * 60,
        date_key: "x".into(),
    };
    assert!(!tp.contains_with_exclusions(&before, &|_| None));
    assert!(tp.contains_with_exclusions(&during, &|_| None));
    assert!(!tp.contains_with_exclusions(&after, &|_| None));
}

#[test]
fn range_wraps_past_midnight() {
    let range = Timerange::new(22 * 60, 2 * 60);
    assert!(range.contains_minute_of_day(23 * 60));
    assert!(range.contains_minute_of_day(60));
    assert!(!range.contains_minute_of_day(12 * 60));
}

#[test]
fn exclusion_removes_time_from_period() {
    let mut base = Timeperiod::new("base");
    base.week[2] = vec![Timerange::new(0, 24 * 60)];
    base.exclusions = vec![TimeperiodName::new("maintenance")];

    let mut maintenance = Timeperiod::new("maintenance");
    maintenance.week[2] = vec![Timerange::new(2 * 60, 4 * 60)];

    let lookup = move |name: &TimeperiodName| {
        if name.as_str() == "maintenance" {
            Some(maintenance.clone())
        } else {
            None
        }
    };

    let during_maintenance = Timepoint {
        weekday: 2,
        minute_of_day: 3 * 60,
        date_key: "x".into(),
    };
    let outside_maintenance = Timepoint {
        weekday: 2,
        minute_of_day: 10 * 60,
        date_key: "x".into(),
    };

    assert!(!base.contains_with_exclusions(&during_maintenance, &lookup));
    assert!(base.contains_with_exclusions(&outside_maintenance, &lookup));
}

#[test]
fn calendar_exception_overrides_weekly_range() {
    let mut tp = Timeperiod::new("holidays");
    tp.week[4] = vec![Timerange::new(9 * 60, 17 * 60)];
    tp.exceptions.insert("12-25".into(), vec![]); // closed all day

    let point = Timepoint {
        weekday: 4,
        minute_of_day: 10 * 60,
        date_key: "12-25".into(),
    };
    assert!(!tp.contains_with_exclusions(&point, &|_| None));
}

#[test]
fn from_unix_known_epoch_is_thursday() {
    let point = Timepoint::from_unix(0);
    assert_eq!(point.weekday, 4); // 1970-01-01 was a Thursday
    assert_eq!(point.date_key, "01-01");
}
