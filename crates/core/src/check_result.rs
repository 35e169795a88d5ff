// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result of running (or receiving) a single check.

use crate::check_options::CheckOptions;
use crate::command::CommandName;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Active checks are dispatched by the scheduler; passive checks arrive
/// over the NRDP ingestion endpoint (or any other external submitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Active,
    Passive,
}

/// Subject of a check: a host, or a service on a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CheckSubject {
    pub host_name: String,
    pub service_description: Option<String>,
}

impl CheckSubject {
    pub fn host(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            service_description: None,
        }
    }

    pub fn service(host_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            service_description: Some(description.into()),
        }
    }

    pub fn is_service(&self) -> bool {
        self.service_description.is_some()
    }
}

/// The raw outcome of running (or receiving) one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub subject: CheckSubject,
    pub check_type: CheckType,
    pub return_code: i32,
    pub output: String,
    pub start_time: SystemTime,
    pub finish_time: SystemTime,
    pub latency: Duration,
    pub execution_time: Duration,
    pub early_timeout: bool,
    pub exited_ok: bool,
    pub check_options: CheckOptions,
    pub dynamic_register: bool,
    /// Command that produced this result, for active checks (passive
    /// results have no associated command).
    pub command: Option<CommandName>,
}

/// Builder for [`CheckResult`], mirroring the teacher's `JobConfig`-style
/// plain-struct-with-builder-methods convention.
#[derive(Debug, Clone)]
pub struct CheckResultBuilder {
    result: CheckResult,
}

impl CheckResultBuilder {
    pub fn new(subject: CheckSubject, check_type: CheckType) -> Self {
        Self {
            result: CheckResult {
                subject,
                check_type,
                return_code: 0,
                output: String::new(),
                start_time: SystemTime::UNIX_EPOCH,
                finish_time: SystemTime::UNIX_EPOCH,
                latency: Duration::ZERO,
                execution_time: Duration::ZERO,
                early_timeout: false,
                exited_ok: true,
                check_options: CheckOptions::empty(),
                dynamic_register: false,
                command: None,
            },
        }
    }

    pub fn return_code(mut self, code: i32) -> Self {
        self.result.return_code = code;
        self
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.result.output = output.into();
        self
    }

    pub fn times(mut self, start: SystemTime, finish: SystemTime) -> Self {
        self.result.start_time = start;
        self.result.finish_time = finish;
        self.result.execution_time = finish.duration_since(start).unwrap_or(Duration::ZERO);
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.result.latency = latency;
        self
    }

    pub fn early_timeout(mut self, timed_out: bool) -> Self {
        self.result.early_timeout = timed_out;
        self
    }

    pub fn exited_ok(mut self, ok: bool) -> Self {
        self.result.exited_ok = ok;
        self
    }

    pub fn check_options(mut self, options: CheckOptions) -> Self {
        self.result.check_options = options;
        self
    }

    pub fn dynamic_register(mut self, dynamic: bool) -> Self {
        self.result.dynamic_register = dynamic;
        self
    }

    pub fn command(mut self, command: CommandName) -> Self {
        self.result.command = Some(command);
        self
    }

    pub fn build(self) -> CheckResult {
        self.result
    }
}

#[cfg(test)]
#[path = "check_result_tests.rs"]
mod tests;
