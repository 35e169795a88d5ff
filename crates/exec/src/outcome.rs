// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The raw result of running one plugin command, before it is turned into
//! a [`monitor_core::CheckResult`] (spec §4.3, §4.4).

/// Output longer than this is truncated to bound result memory at scale.
pub const MAX_OUTPUT_BYTES: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCheckOutcome {
    pub output: String,
    pub return_code: i32,
    pub early_timeout: bool,
    pub exited_ok: bool,
}

impl RawCheckOutcome {
    pub fn timed_out(timeout_secs: u64) -> Self {
        Self {
            output: format!("(Check timed out after {timeout_secs} seconds)"),
            return_code: 2,
            early_timeout: true,
            exited_ok: false,
        }
    }

    pub fn truncate_output(&mut self) {
        if self.output.len() > MAX_OUTPUT_BYTES {
            let mut end = MAX_OUTPUT_BYTES;
            while !self.output.is_char_boundary(end) {
                end -= 1;
            }
            self.output.truncate(end);
        }
    }
}

/// Apply the fallback-path "no stdout but stderr had data" prefix
/// (spec §4.3 output capture).
pub fn combine_direct_exec_output(stdout: &str, stderr: &str) -> String {
    if stdout.is_empty() && !stderr.is_empty() {
        format!("(No output on stdout) stderr: {stderr}")
    } else {
        stdout.to_string()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
