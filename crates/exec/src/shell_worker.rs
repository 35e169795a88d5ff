// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persistent `/bin/sh` read/eval protocol (spec §4.3).
//!
//! One [`PersistentShell`] backs one pool worker for its entire lifetime.
//! Commands are pipelined through the shell's stdin one line at a time;
//! the shell echoes a sentinel-tagged exit code on its stdout so the
//! worker can tell where one command's output ends.

use crate::outcome::RawCheckOutcome;
use crate::sentinel::generate_sentinel;
use crate::ExecError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

/// The shell script each persistent worker runs (spec §4.3).
fn protocol_script(sentinel: &str) -> String {
    format!(
        "s=\"{sentinel}\"; while IFS= read -r c; do (eval \"$c\") </dev/null 2>&1; \
         printf '%s %d\\n' \"$s\" $?; done"
    )
}

pub struct PersistentShell {
    sentinel: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
}

impl PersistentShell {
    pub fn new() -> Self {
        Self {
            sentinel: generate_sentinel(),
            child: None,
            stdin: None,
            stdout: None,
        }
    }

    /// Run one command line, retrying once after a respawn if the shell
    /// has died, and falling back to direct fork/exec if the respawn
    /// also fails (spec §4.3).
    pub async fn run(&mut self, command_line: &str, timeout: Duration) -> RawCheckOutcome {
        match self.try_run(command_line, timeout).await {
            Ok(outcome) => outcome,
            Err(first_err) => {
                tracing::warn!(error = %first_err, "persistent shell protocol failed, respawning");
                self.teardown();
                match self.try_run(command_line, timeout).await {
                    Ok(outcome) => outcome,
                    Err(second_err) => {
                        tracing::error!(
                            error = %second_err,
                            "persistent shell failed twice, falling back to direct exec"
                        );
                        self.teardown();
                        crate::direct_exec::run_direct(command_line, timeout).await
                    }
                }
            }
        }
    }

    async fn ensure_spawned(&mut self) -> Result<(), ExecError> {
        if self.child.is_some() {
            return Ok(());
        }
        let script = protocol_script(&self.sentinel);
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(ExecError::ShellSpawnFailed)?;
        self.stdin = child.stdin.take();
        self.stdout = child.stdout.take().map(BufReader::new);
        self.child = Some(child);
        Ok(())
    }

    async fn try_run(
        &mut self,
        command_line: &str,
        timeout: Duration,
    ) -> Result<RawCheckOutcome, ExecError> {
        self.ensure_spawned().await?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ExecError::ShellDied("stdin closed".to_string()))?;
        stdin.write_all(command_line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;

        let sentinel = self.sentinel.clone();
        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| ExecError::ShellDied("stdout closed".to_string()))?;
        let read_future = read_until_sentinel(stdout, &sentinel);

        match tokio::time::timeout(timeout, read_future).await {
            Ok(Ok(mut outcome)) => {
                outcome.truncate_output();
                Ok(outcome)
            }
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => {
                self.kill_process_group();
                self.teardown();
                Ok(RawCheckOutcome::timed_out(timeout.as_secs()))
            }
        }
    }

    fn kill_process_group(&mut self) {
        let Some(child) = &self.child else { return };
        let Some(pid) = child.id() else { return };
        if let Err(e) = signal::killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            tracing::debug!(error = %e, pid, "killpg failed (process may already be gone)");
        }
    }

    /// Drop our handles and reap the child on a detached task so a
    /// respawn never blocks the caller on `wait()`.
    fn teardown(&mut self) {
        self.stdin = None;
        self.stdout = None;
        if let Some(mut child) = self.child.take() {
            tokio::spawn(async move {
                let _ = child.wait().await;
            });
        }
    }
}

impl Default for PersistentShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PersistentShell {
    fn drop(&mut self) {
        self.kill_process_group();
    }
}

async fn read_until_sentinel(
    stdout: &mut BufReader<ChildStdout>,
    sentinel: &str,
) -> Result<RawCheckOutcome, ExecError> {
    let prefix = format!("{sentinel} ");
    let mut lines: Vec<String> = Vec::new();
    loop {
        let mut line = String::new();
        let n = stdout.read_line(&mut line).await?;
        if n == 0 {
            return Err(ExecError::ShellDied("eof before sentinel".to_string()));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if let Some(code_str) = trimmed.strip_prefix(&prefix) {
            let return_code: i32 = code_str.trim().parse().unwrap_or(3);
            return Ok(RawCheckOutcome {
                output: lines.join("\n"),
                return_code,
                early_timeout: false,
                exited_ok: true,
            });
        }
        lines.push(trimmed.to_string());
    }
}

#[cfg(test)]
#[path = "shell_worker_tests.rs"]
mod tests;
