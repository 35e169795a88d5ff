// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct fork/exec fallback, used when the persistent shell protocol
//! cannot be trusted for a job (respawn failure) or is disabled.

use crate::outcome::{combine_direct_exec_output, RawCheckOutcome};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Run `command_line` through `/bin/sh -c` as a one-shot child process,
/// bounded by `timeout`. Never returns an error: failures to even spawn
/// the child are folded into the outcome the way a failed plugin would be.
pub async fn run_direct(command_line: &str, timeout: Duration) -> RawCheckOutcome {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c")
        .arg(command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return RawCheckOutcome {
                output: format!("(Unable to execute command: {e})"),
                return_code: 3,
                early_timeout: false,
                exited_ok: false,
            }
        }
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut outcome = RawCheckOutcome {
                output: combine_direct_exec_output(&stdout, &stderr),
                return_code: output.status.code().unwrap_or(3),
                early_timeout: false,
                exited_ok: output.status.success() || output.status.code().is_some(),
            };
            outcome.truncate_output();
            outcome
        }
        Ok(Err(e)) => RawCheckOutcome {
            output: format!("(Error reading command output: {e})"),
            return_code: 3,
            early_timeout: false,
            exited_ok: false,
        },
        Err(_elapsed) => RawCheckOutcome::timed_out(timeout.as_secs()),
    }
}

#[cfg(test)]
#[path = "direct_exec_tests.rs"]
mod tests;
