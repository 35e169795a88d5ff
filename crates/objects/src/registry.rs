// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic host/service lifecycle: auto-registration from passive-only
//! submitters and TTL-based pruning (spec §4.11). Both operations run
//! under the object graph's write lock, already held by the scheduler
//! during result processing.

use crate::graph::GraphInner;
use monitor_core::{Clock, CommandName, Host, Service};
use std::time::Duration;

/// Owned by the scheduler; stateless beyond the configured TTL, all
/// bookkeeping lives on the `last_seen` fields of the objects themselves.
pub struct DynamicRegistry {
    ttl: Duration,
}

impl DynamicRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Insert a passive-only host if absent; otherwise just touch it.
    /// Returns `true` if a new host was created.
    pub fn ensure_host(
        &self,
        graph: &mut GraphInner,
        clock: &dyn Clock,
        host_name: &str,
        default_command: &CommandName,
    ) -> bool {
        if graph.host(host_name).is_some() {
            self.touch_host(graph, clock, host_name);
            return false;
        }
        let mut host = Host::new(host_name, default_command.clone());
        host.max_check_attempts = 1;
        host.active_checks_enabled = false;
        host.passive_checks_enabled = true;
        host.dynamic = true;
        host.last_seen = Some(clock.wall_now());
        graph
            .insert_host(host)
            .expect("host absence just confirmed under the write lock");
        true
    }

    /// Ensure the owning host exists, then insert the service if absent.
    /// Returns `true` if a new service was created.
    pub fn ensure_service(
        &self,
        graph: &mut GraphInner,
        clock: &dyn Clock,
        host_name: &str,
        description: &str,
        default_command: &CommandName,
    ) -> bool {
        self.ensure_host(graph, clock, host_name, default_command);

        if graph.service(host_name, description).is_some() {
            self.touch_service(graph, clock, host_name, description);
            return false;
        }
        let mut service = Service::new(host_name, description, default_command.clone());
        service.max_check_attempts = 1;
        service.active_checks_enabled = false;
        service.passive_checks_enabled = true;
        service.dynamic = true;
        service.last_seen = Some(clock.wall_now());
        graph
            .insert_service(service)
            .expect("service absence just confirmed under the write lock");
        true
    }

    pub fn touch_host(&self, graph: &mut GraphInner, clock: &dyn Clock, host_name: &str) {
        if let Some(host) = graph.host_mut(host_name) {
            host.last_seen = Some(clock.wall_now());
        }
    }

    pub fn touch_service(
        &self,
        graph: &mut GraphInner,
        clock: &dyn Clock,
        host_name: &str,
        description: &str,
    ) {
        if let Some(service) = graph.service_mut(host_name, description) {
            service.last_seen = Some(clock.wall_now());
        }
    }

    /// Remove dynamic objects whose `last_seen` predates the TTL.
    /// Services are pruned before hosts, matching spec §4.11's ordering
    /// (a host pruned first would already sweep its services, masking the
    /// per-service TTL check). Returns `(services_pruned, hosts_pruned)`.
    pub fn prune(&self, graph: &mut GraphInner, clock: &dyn Clock) -> (usize, usize) {
        let now = clock.wall_now();

        let stale_services: Vec<(String, String)> = graph
            .services
            .values()
            .filter(|s| s.dynamic && self.is_stale(s.last_seen, now))
            .map(|s| {
                (
                    s.key.host_name.as_str().to_string(),
                    s.key.description.as_str().to_string(),
                )
            })
            .collect();
        let services_pruned = stale_services.len();
        for (host_name, description) in stale_services {
            graph.remove_service(&host_name, &description);
        }

        let stale_hosts: Vec<String> = graph
            .hosts
            .values()
            .filter(|h| h.dynamic && self.is_stale(h.last_seen, now))
            .map(|h| h.name.as_str().to_string())
            .collect();
        let hosts_pruned = stale_hosts.len();
        for host_name in stale_hosts {
            graph.remove_host(&host_name);
        }

        (services_pruned, hosts_pruned)
    }

    fn is_stale(&self, last_seen: Option<std::time::SystemTime>, now: std::time::SystemTime) -> bool {
        match last_seen {
            Some(seen) => now.duration_since(seen).unwrap_or_default() > self.ttl,
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
