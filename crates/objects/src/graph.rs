// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The object graph: one coarse read/write lock over every typed entity
//! (spec §4.1, §5). Readers (status-file writer, retention writer,
//! livestatus-style queries) take the read lock; the scheduler loop and
//! dynamic registration are the only write-lock holders, and never hold it
//! across an await point.

use monitor_core::{
    Command, CommandName, Dependency, Escalation, Host, HostName, Service, ServiceDescription,
    ServiceKey, Timeperiod, TimeperiodName,
};
use monitor_core::CoreError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;

/// Everything the engine needs to know about the monitored inventory.
#[derive(Debug, Default)]
pub struct GraphInner {
    pub(crate) hosts: HashMap<HostName, Host>,
    pub(crate) services: HashMap<ServiceKey, Service>,
    pub(crate) commands: HashMap<CommandName, Command>,
    pub(crate) timeperiods: HashMap<TimeperiodName, Timeperiod>,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) escalations: Vec<Escalation>,
}

impl GraphInner {
    pub fn insert_host(&mut self, host: Host) -> Result<(), CoreError> {
        if self.hosts.contains_key(&host.name) {
            return Err(CoreError::DuplicateHost(host.name.as_str().to_string()));
        }
        self.hosts.insert(host.name.clone(), host);
        Ok(())
    }

    pub fn insert_service(&mut self, service: Service) -> Result<(), CoreError> {
        if self.services.contains_key(&service.key) {
            return Err(CoreError::DuplicateService(
                service.key.host_name.as_str().to_string(),
                service.key.description.as_str().to_string(),
            ));
        }
        self.services.insert(service.key.clone(), service);
        Ok(())
    }

    pub fn insert_command(&mut self, command: Command) -> Result<(), CoreError> {
        if self.commands.contains_key(&command.name) {
            return Err(CoreError::DuplicateCommand(command.name.as_str().to_string()));
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub fn insert_timeperiod(&mut self, timeperiod: Timeperiod) -> Result<(), CoreError> {
        if self.timeperiods.contains_key(&timeperiod.name) {
            return Err(CoreError::DuplicateTimeperiod(
                timeperiod.name.as_str().to_string(),
            ));
        }
        self.timeperiods.insert(timeperiod.name.clone(), timeperiod);
        Ok(())
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    pub fn add_escalation(&mut self, escalation: Escalation) {
        self.escalations.push(escalation);
    }

    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    pub fn host_mut(&mut self, name: &str) -> Option<&mut Host> {
        self.hosts.get_mut(name)
    }

    pub fn service(&self, host_name: &str, description: &str) -> Option<&Service> {
        self.services
            .values()
            .find(|s| s.key.host_name == *host_name && s.key.description == *description)
    }

    pub fn service_mut(&mut self, host_name: &str, description: &str) -> Option<&mut Service> {
        self.services
            .values_mut()
            .find(|s| s.key.host_name == *host_name && s.key.description == *description)
    }

    pub fn services_of_host<'a>(&'a self, host_name: &'a str) -> impl Iterator<Item = &'a Service> {
        self.services.values().filter(move |s| s.key.host_name == *host_name)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn hosts_mut(&mut self) -> impl Iterator<Item = &mut Host> {
        self.hosts.values_mut()
    }

    pub fn services_mut(&mut self) -> impl Iterator<Item = &mut Service> {
        self.services.values_mut()
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn timeperiod(&self, name: &str) -> Option<&Timeperiod> {
        self.timeperiods.get(name)
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn escalations(&self) -> &[Escalation] {
        &self.escalations
    }

    /// Remove a host and, per spec §3 invariant 6, every service it owns
    /// (only meaningful for dynamic hosts — static objects are never
    /// pruned, enforced by the caller).
    pub fn remove_host(&mut self, name: &str) -> Option<Host> {
        let removed = self.hosts.remove(name);
        if removed.is_some() {
            self.services.retain(|key, _| key.host_name != *name);
        }
        removed
    }

    pub fn remove_service(&mut self, host_name: &str, description: &str) -> Option<Service> {
        let key = self
            .services
            .keys()
            .find(|k| k.host_name == *host_name && k.description == *description)
            .cloned();
        key.and_then(|k| self.services.remove(&k))
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}

/// The RW lock wrapper the rest of the engine depends on.
#[derive(Debug, Default)]
pub struct ObjectGraph {
    inner: RwLock<GraphInner>,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(GraphInner::default()),
        }
    }

    /// Wrap an already-populated [`GraphInner`] (e.g. one built from a
    /// loaded object-definitions file).
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: RwLock::new(inner),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, GraphInner> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, GraphInner> {
        self.inner.write()
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
