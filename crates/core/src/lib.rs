// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! monitor-core: object model, state machines, and scheduler primitives
//! for the Nagios-compatible monitoring engine.

pub mod callbacks;
pub mod check_options;
pub mod check_result;
pub mod clock;
pub mod command;
pub mod config;
pub mod dependency;
pub mod error;
pub mod escalation;
pub mod event;
pub mod flap;
pub mod host;
pub mod id;
pub mod notification;
pub mod service;
pub mod time_fmt;
pub mod timeperiod;

pub use callbacks::{EngineCallbacks, HostLookup, ServiceLookup};
pub use check_options::CheckOptions;
pub use check_result::{CheckResult, CheckResultBuilder, CheckSubject, CheckType};
pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{Command, CommandName};
pub use config::EngineConfig;
pub use dependency::{Dependency, DependencyKind, DependencyMask};
pub use error::CoreError;
pub use escalation::{Escalation, EscalationOptions};
pub use event::{Event, EventId, EventKind};
pub use flap::FlapHistory;
pub use host::{
    AcknowledgementType, FreshnessConfig, Host, HostName, HostNotifyOn, HostState, StateType,
};
pub use id::{IdGen, ShortId, UuidIdGen};
pub use notification::NotificationType;
pub use service::{Service, ServiceDescription, ServiceKey, ServiceNotifyOn, ServiceState};
pub use time_fmt::{format_elapsed, format_elapsed_ms};
pub use timeperiod::{Timepoint, Timerange, Timeperiod, TimeperiodName};
