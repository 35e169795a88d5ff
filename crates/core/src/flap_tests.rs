// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn index_always_stays_in_ring_bounds() {
    let mut history = FlapHistory::new();
    for i in 0..50 {
        history.record((i % 3) as i8);
        assert!(history.index() <= 20);
    }
}

#[test]
fn flat_history_reports_zero_percent() {
    let mut history = FlapHistory::new();
    for _ in 0..25 {
        history.record(0);
    }
    assert_eq!(history.percent, 0.0);
}

#[test]
fn alternating_history_reports_full_percent() {
    let mut history = FlapHistory::new();
    for i in 0..25 {
        history.record(if i % 2 == 0 { 0 } else { 1 });
    }
    assert!(history.percent > 99.0);
}

#[test]
fn hysteresis_matches_scenario_thresholds() {
    let low = 20.0;
    let high = 30.0;
    let mut history = FlapHistory::new();

    history.percent = 25.0;
    history.update_hysteresis(low, high);
    assert!(!history.is_flapping);

    history.percent = 35.0;
    history.update_hysteresis(low, high);
    assert!(history.is_flapping);

    history.percent = 25.0;
    history.update_hysteresis(low, high);
    assert!(history.is_flapping);

    history.percent = 15.0;
    history.update_hysteresis(low, high);
    assert!(!history.is_flapping);
}
