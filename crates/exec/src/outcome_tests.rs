// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn timed_out_outcome_matches_legacy_shape() {
    let outcome = RawCheckOutcome::timed_out(30);
    assert_eq!(outcome.return_code, 2);
    assert!(outcome.early_timeout);
    assert!(!outcome.exited_ok);
    assert_eq!(outcome.output, "(Check timed out after 30 seconds)");
}

#[test]
fn truncate_output_caps_at_8192_bytes() {
    let mut outcome = RawCheckOutcome {
        output: "x".repeat(10_000),
        return_code: 0,
        early_timeout: false,
        exited_ok: true,
    };
    outcome.truncate_output();
    assert_eq!(outcome.output.len(), MAX_OUTPUT_BYTES);
}

#[test]
fn short_output_is_untouched() {
    let mut outcome = RawCheckOutcome {
        output: "OK".to_string(),
        return_code: 0,
        early_timeout: false,
        exited_ok: true,
    };
    outcome.truncate_output();
    assert_eq!(outcome.output, "OK");
}

#[test]
fn direct_exec_prefixes_stderr_when_stdout_empty() {
    let combined = combine_direct_exec_output("", "permission denied");
    assert_eq!(combined, "(No output on stdout) stderr: permission denied");
}

#[test]
fn direct_exec_prefers_stdout_when_present() {
    let combined = combine_direct_exec_output("OK", "ignored");
    assert_eq!(combined, "OK");
}
