// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw OS-level check execution: the persistent shell protocol, its
//! direct-exec fallback, and the observability wrapper around both.
//!
//! This crate knows nothing about hosts, services, or scheduling — it
//! only knows how to turn a command line and a timeout into a
//! [`RawCheckOutcome`].

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod direct_exec;
mod error;
mod outcome;
mod sentinel;
mod shell_worker;
mod traced;

pub use direct_exec::run_direct;
pub use error::ExecError;
pub use outcome::{combine_direct_exec_output, RawCheckOutcome, MAX_OUTPUT_BYTES};
pub use shell_worker::PersistentShell;
pub use traced::{CheckExecutor, TracedExecutor};
