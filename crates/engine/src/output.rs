// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin output parsing and return-code classification (spec §4.4).

use monitor_core::{HostState, ServiceState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    pub short: String,
    pub long: String,
    pub perf: String,
}

/// Split raw plugin output into short text, long text, and perfdata.
///
/// First line is `SHORT | PERFDATA?`; subsequent lines are long output
/// until a line beginning with `|`, after which every remaining line is
/// perfdata. Semicolons are replaced with colons in short/long text only
/// (a legacy rule avoiding collision with the status-file delimiter);
/// perfdata keeps its semicolons untouched.
pub fn parse_plugin_output(raw: &str) -> ParsedOutput {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or("");
    let (short_raw, first_perf) = split_on_pipe(first);

    let mut long_lines: Vec<String> = Vec::new();
    let mut perf_parts: Vec<String> = Vec::new();
    if let Some(p) = first_perf {
        let trimmed = p.trim();
        if !trimmed.is_empty() {
            perf_parts.push(trimmed.to_string());
        }
    }

    let mut in_perf = false;
    for line in lines {
        if !in_perf && line.trim_start().starts_with('|') {
            in_perf = true;
            let rest = line.trim_start().trim_start_matches('|').trim();
            if !rest.is_empty() {
                perf_parts.push(rest.to_string());
            }
            continue;
        }
        if in_perf {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                perf_parts.push(trimmed.to_string());
            }
        } else {
            long_lines.push(replace_semicolons(line));
        }
    }

    ParsedOutput {
        short: replace_semicolons(short_raw.trim()),
        long: long_lines.join("\\n"),
        perf: perf_parts.join(" "),
    }
}

fn split_on_pipe(line: &str) -> (&str, Option<&str>) {
    match line.find('|') {
        Some(idx) => (&line[..idx], Some(&line[idx + 1..])),
        None => (line, None),
    }
}

fn replace_semicolons(s: &str) -> String {
    s.replace(';', ":")
}

/// Return-code mapping for active service checks (spec §4.4).
pub fn classify_service_state(
    return_code: i32,
    early_timeout: bool,
    exited_ok: bool,
    timeout_state: ServiceState,
) -> ServiceState {
    if early_timeout {
        return timeout_state;
    }
    if !exited_ok {
        return ServiceState::Critical;
    }
    match return_code {
        0 => ServiceState::Ok,
        1 => ServiceState::Warning,
        2 => ServiceState::Critical,
        3 => ServiceState::Unknown,
        _ => ServiceState::Critical,
    }
}

/// Return-code mapping for active host checks (spec §4.4).
pub fn classify_host_state_active(
    return_code: i32,
    early_timeout: bool,
    exited_ok: bool,
    aggressive_host_checking: bool,
) -> HostState {
    if early_timeout || !exited_ok {
        return HostState::Down;
    }
    match return_code {
        0 => HostState::Up,
        1 if aggressive_host_checking => HostState::Down,
        1 => HostState::Up,
        _ => HostState::Down,
    }
}

/// Passive host-check status codes map directly, with anything outside
/// the known range treated as Unreachable rather than trusted blindly.
pub fn classify_host_state_passive(status: i32) -> HostState {
    match status {
        0 => HostState::Up,
        1 => HostState::Down,
        _ => HostState::Unreachable,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
