// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The 21-slot flap detector (spec §4.7).
//!
//! Each host and service owns one [`FlapHistory`]. Recordable transitions
//! are written into a circular ring of recent state codes; the percent of
//! weighted adjacent-pair changes decides whether the object is flapping,
//! with separate high/low thresholds giving the detector hysteresis.

use serde::{Deserialize, Serialize};

const RING_LEN: usize = 21;
/// Number of adjacent pairs examined on every recompute (`RING_LEN - 1`).
const PAIR_COUNT: usize = RING_LEN - 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlapHistory {
    ring: [i8; RING_LEN],
    index: usize,
    pub percent: f64,
    pub is_flapping: bool,
}

impl FlapHistory {
    pub fn new() -> Self {
        Self {
            ring: [0; RING_LEN],
            index: 0,
            percent: 0.0,
            is_flapping: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Record a new state-code observation and recompute the percent.
    /// `state_code` is an arbitrary small discriminant (e.g. the numeric
    /// value of `HostState`/`ServiceState`); only equality between
    /// consecutive slots matters.
    pub fn record(&mut self, state_code: i8) {
        self.ring[self.index] = state_code;
        self.index = (self.index + 1) % RING_LEN;
        self.recompute_percent();
    }

    fn recompute_percent(&mut self) {
        let mut weighted_sum = 0.0;
        for k in 1..=PAIR_COUNT {
            let cur = self.ring[(self.index + k) % RING_LEN];
            let prev = self.ring[(self.index + k - 1) % RING_LEN];
            if cur != prev {
                let weight = (k as f64 - 1.0) * (1.25 - 0.75) / (PAIR_COUNT as f64 - 1.0) + 0.75;
                weighted_sum += weight;
            }
        }
        self.percent = weighted_sum / PAIR_COUNT as f64 * 100.0;
    }

    /// Apply hysteresis to `is_flapping` given the object's configured
    /// thresholds. Idempotent; safe to call after every recompute.
    pub fn update_hysteresis(&mut self, low_threshold: f64, high_threshold: f64) {
        if !self.is_flapping && self.percent >= high_threshold {
            self.is_flapping = true;
        } else if self.is_flapping && self.percent < low_threshold {
            self.is_flapping = false;
        }
    }
}

impl Default for FlapHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "flap_tests.rs"]
mod tests;
