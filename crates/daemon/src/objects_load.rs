// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads the static object inventory (hosts, services, commands,
//! timeperiods, dependencies) from a TOML definitions file into a fresh
//! [`GraphInner`]. Config *grammar* is explicitly out of scope for the
//! core (spec §1); this is the daemon's own external collaborator for it,
//! grounded the same way the teacher's `daemon::lifecycle` resolves its
//! on-disk definitions into in-memory state at startup.

use monitor_core::{
    CheckSubject, Command, Dependency, DependencyMask, Host, HostNotifyOn, Service,
    ServiceNotifyOn, Timeperiod, Timerange,
};
use monitor_objects::GraphInner;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read object definitions {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse object definitions {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
    #[error("invalid time range {0:?}")]
    BadTimeRange(String),
    #[error(transparent)]
    Duplicate(#[from] monitor_core::CoreError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ObjectDefinitions {
    pub commands: Vec<CommandDef>,
    pub timeperiods: Vec<TimeperiodDef>,
    pub hosts: Vec<HostDef>,
    pub services: Vec<ServiceDef>,
    pub host_dependencies: Vec<DependencyDef>,
    pub service_dependencies: Vec<DependencyDef>,
}

#[derive(Debug, Deserialize)]
pub struct CommandDef {
    pub name: String,
    pub line: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TimeperiodDef {
    pub name: String,
    /// Weekday index ("0".."6", 0 = Sunday) to a list of `"HH:MM-HH:MM"`.
    pub ranges: HashMap<String, Vec<String>>,
    pub exclusions: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_check_interval() -> f64 {
    5.0
}
fn default_retry_interval() -> f64 {
    1.0
}
fn default_max_attempts() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HostDef {
    pub name: String,
    pub alias: String,
    pub address: String,
    pub display_name: String,
    pub check_command: String,
    pub check_args: Vec<String>,
    pub active_checks_enabled: bool,
    pub passive_checks_enabled: bool,
    pub check_interval: f64,
    pub retry_interval: f64,
    pub max_check_attempts: u32,
    pub check_period: Option<String>,
    pub parents: Vec<String>,
    pub flap_detection_enabled: bool,
    pub flap_low_threshold: f64,
    pub flap_high_threshold: f64,
}

impl Default for HostDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            alias: String::new(),
            address: String::new(),
            display_name: String::new(),
            check_command: String::new(),
            check_args: Vec::new(),
            active_checks_enabled: default_true(),
            passive_checks_enabled: default_true(),
            check_interval: default_check_interval(),
            retry_interval: default_retry_interval(),
            max_check_attempts: default_max_attempts(),
            check_period: None,
            parents: Vec::new(),
            flap_detection_enabled: false,
            flap_low_threshold: 20.0,
            flap_high_threshold: 30.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceDef {
    pub host_name: String,
    pub description: String,
    pub display_name: String,
    pub check_command: String,
    pub check_args: Vec<String>,
    pub active_checks_enabled: bool,
    pub passive_checks_enabled: bool,
    pub check_interval: f64,
    pub retry_interval: f64,
    pub max_check_attempts: u32,
    pub check_period: Option<String>,
    pub flap_detection_enabled: bool,
    pub flap_low_threshold: f64,
    pub flap_high_threshold: f64,
    pub is_volatile: bool,
}

impl Default for ServiceDef {
    fn default() -> Self {
        Self {
            host_name: String::new(),
            description: String::new(),
            display_name: String::new(),
            check_command: String::new(),
            check_args: Vec::new(),
            active_checks_enabled: default_true(),
            passive_checks_enabled: default_true(),
            check_interval: default_check_interval(),
            retry_interval: default_retry_interval(),
            max_check_attempts: default_max_attempts(),
            check_period: None,
            flap_detection_enabled: false,
            flap_low_threshold: 20.0,
            flap_high_threshold: 30.0,
            is_volatile: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DependencyDef {
    pub master_host: String,
    pub master_service: Option<String>,
    pub dependent_host: String,
    pub dependent_service: Option<String>,
    pub notification_failure_states: Vec<String>,
    pub execution_failure_states: Vec<String>,
    pub inherits_parent: bool,
}

/// Parse `"HH:MM-HH:MM"` into a [`Timerange`].
fn parse_timerange(spec: &str) -> Result<Timerange, LoadError> {
    let (start, end) = spec
        .split_once('-')
        .ok_or_else(|| LoadError::BadTimeRange(spec.to_string()))?;
    Ok(Timerange::new(
        parse_hhmm(start).ok_or_else(|| LoadError::BadTimeRange(spec.to_string()))?,
        parse_hhmm(end).ok_or_else(|| LoadError::BadTimeRange(spec.to_string()))?,
    ))
}

fn parse_hhmm(spec: &str) -> Option<u16> {
    let (h, m) = spec.split_once(':')?;
    let h: u16 = h.parse().ok()?;
    let m: u16 = m.parse().ok()?;
    if h == 24 && m == 0 {
        return Some(24 * 60);
    }
    Some(h * 60 + m)
}

fn parse_mask(states: &[String]) -> DependencyMask {
    let mut mask = DependencyMask::empty();
    for s in states {
        mask |= match s.to_ascii_lowercase().as_str() {
            "warning" => DependencyMask::WARNING,
            "unknown" => DependencyMask::UNKNOWN,
            "critical" => DependencyMask::CRITICAL,
            "down" => DependencyMask::DOWN,
            "unreachable" => DependencyMask::UNREACHABLE,
            _ => DependencyMask::empty(),
        };
    }
    mask
}

pub fn load_from_str(text: &str) -> Result<ObjectDefinitions, LoadError> {
    toml::from_str(text).map_err(|source| LoadError::Parse {
        path: "<memory>".to_string(),
        source,
    })
}

pub fn load_from_path(path: &std::path::Path) -> Result<ObjectDefinitions, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Populate a fresh [`GraphInner`] from parsed definitions. Escalations are
/// not part of the TOML grammar today (no corresponding spec §3 operation
/// reads them back out yet); the vector is always empty.
pub fn populate(graph: &mut GraphInner, defs: &ObjectDefinitions) -> Result<(), LoadError> {
    for c in &defs.commands {
        graph.insert_command(Command::new(c.name.as_str(), c.line.as_str()))?;
    }

    for tp in &defs.timeperiods {
        let mut period = Timeperiod::new(tp.name.as_str());
        for (weekday, ranges) in &tp.ranges {
            let idx: usize = weekday
                .parse()
                .map_err(|_| LoadError::BadTimeRange(weekday.clone()))?;
            if idx > 6 {
                return Err(LoadError::BadTimeRange(weekday.clone()));
            }
            for r in ranges {
                period.week[idx].push(parse_timerange(r)?);
            }
        }
        for excl in &tp.exclusions {
            period.exclusions.push(excl.as_str().into());
        }
        graph.insert_timeperiod(period)?;
    }

    for h in &defs.hosts {
        let mut host = Host::new(h.name.as_str(), h.check_command.as_str());
        host.alias = h.alias.clone();
        host.address = h.address.clone();
        host.display_name = if h.display_name.is_empty() {
            h.name.clone()
        } else {
            h.display_name.clone()
        };
        host.check_args = h.check_args.clone();
        host.active_checks_enabled = h.active_checks_enabled;
        host.passive_checks_enabled = h.passive_checks_enabled;
        host.check_interval = h.check_interval;
        host.retry_interval = h.retry_interval;
        host.max_check_attempts = h.max_check_attempts;
        host.notification_options = HostNotifyOn::all();
        host.check_period = h.check_period.as_deref().map(Into::into);
        host.parents = h.parents.iter().map(|p| p.as_str().into()).collect();
        host.flap_detection_enabled = h.flap_detection_enabled;
        host.flap_low_threshold = h.flap_low_threshold;
        host.flap_high_threshold = h.flap_high_threshold;
        graph.insert_host(host)?;
    }

    for s in &defs.services {
        let mut service = Service::new(s.host_name.as_str(), s.description.as_str(), s.check_command.as_str());
        service.display_name = if s.display_name.is_empty() {
            s.description.clone()
        } else {
            s.display_name.clone()
        };
        service.check_args = s.check_args.clone();
        service.active_checks_enabled = s.active_checks_enabled;
        service.passive_checks_enabled = s.passive_checks_enabled;
        service.check_interval = s.check_interval;
        service.retry_interval = s.retry_interval;
        service.max_check_attempts = s.max_check_attempts;
        service.notification_options = ServiceNotifyOn::all();
        service.check_period = s.check_period.as_deref().map(Into::into);
        service.flap_detection_enabled = s.flap_detection_enabled;
        service.flap_low_threshold = s.flap_low_threshold;
        service.flap_high_threshold = s.flap_high_threshold;
        service.is_volatile = s.is_volatile;
        graph.insert_service(service)?;
    }

    for d in &defs.host_dependencies {
        graph.add_dependency(Dependency {
            master: CheckSubject::host(d.master_host.as_str()),
            dependent: CheckSubject::host(d.dependent_host.as_str()),
            notification_failure_mask: parse_mask(&d.notification_failure_states),
            execution_failure_mask: parse_mask(&d.execution_failure_states),
            inherits_parent: d.inherits_parent,
            dependency_period: None,
        });
    }

    for d in &defs.service_dependencies {
        let master_service = d.master_service.clone().unwrap_or_default();
        let dependent_service = d.dependent_service.clone().unwrap_or_default();
        graph.add_dependency(Dependency {
            master: CheckSubject::service(d.master_host.as_str(), master_service),
            dependent: CheckSubject::service(d.dependent_host.as_str(), dependent_service),
            notification_failure_mask: parse_mask(&d.notification_failure_states),
            execution_failure_mask: parse_mask(&d.execution_failure_states),
            inherits_parent: d.inherits_parent,
            dependency_period: None,
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "objects_load_tests.rs"]
mod tests;
