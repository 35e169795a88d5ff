// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn captures_stdout_of_a_successful_command() {
    let outcome = run_direct("echo hello", Duration::from_secs(5)).await;
    assert_eq!(outcome.output, "hello");
    assert_eq!(outcome.return_code, 0);
}

#[tokio::test]
async fn reports_nonzero_exit_codes() {
    let outcome = run_direct("exit 2", Duration::from_secs(5)).await;
    assert_eq!(outcome.return_code, 2);
}

#[tokio::test]
async fn falls_back_to_stderr_when_stdout_is_empty() {
    let outcome = run_direct("echo oops 1>&2", Duration::from_secs(5)).await;
    assert_eq!(outcome.output, "(No output on stdout) stderr: oops\n");
}

#[tokio::test]
async fn timing_out_is_reported_as_a_timed_out_outcome() {
    let outcome = run_direct("sleep 5", Duration::from_millis(100)).await;
    assert!(outcome.early_timeout);
    assert_eq!(outcome.return_code, 2);
}
