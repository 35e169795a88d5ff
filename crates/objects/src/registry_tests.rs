// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::graph::GraphInner;
use monitor_core::FakeClock;
use std::time::Duration;

#[test]
fn ensure_host_creates_passive_only_host_once() {
    let registry = DynamicRegistry::new(Duration::from_secs(60));
    let clock = FakeClock::new();
    let mut graph = GraphInner::default();

    let created = registry.ensure_host(&mut graph, &clock, "web01", &CommandName::new("check-dummy"));
    assert!(created);

    let host = graph.host("web01").expect("host was inserted");
    assert!(host.dynamic);
    assert!(!host.active_checks_enabled);
    assert_eq!(host.max_check_attempts, 1);

    let created_again =
        registry.ensure_host(&mut graph, &clock, "web01", &CommandName::new("check-dummy"));
    assert!(!created_again);
    assert_eq!(graph.host_count(), 1);
}

#[test]
fn ensure_service_creates_owning_host_too() {
    let registry = DynamicRegistry::new(Duration::from_secs(60));
    let clock = FakeClock::new();
    let mut graph = GraphInner::default();

    registry.ensure_service(&mut graph, &clock, "web01", "HTTP", &CommandName::new("check-dummy"));

    assert!(graph.host("web01").is_some());
    assert!(graph.service("web01", "HTTP").is_some());
}

#[test]
fn prune_removes_stale_dynamic_objects_but_keeps_static_ones() {
    let registry = DynamicRegistry::new(Duration::from_secs(10));
    let clock = FakeClock::new();
    let mut graph = GraphInner::default();

    registry.ensure_service(&mut graph, &clock, "web01", "HTTP", &CommandName::new("check-dummy"));
    graph
        .insert_host(monitor_core::Host::new("router1", "check-ping"))
        .unwrap();

    clock.advance(Duration::from_secs(20));
    let (services_pruned, hosts_pruned) = registry.prune(&mut graph, &clock);

    assert_eq!(services_pruned, 1);
    assert_eq!(hosts_pruned, 1);
    assert!(graph.host("router1").is_some());
    assert!(graph.host("web01").is_none());
}

#[test]
fn touch_resets_the_ttl_clock() {
    let registry = DynamicRegistry::new(Duration::from_secs(10));
    let clock = FakeClock::new();
    let mut graph = GraphInner::default();

    registry.ensure_host(&mut graph, &clock, "web01", &CommandName::new("check-dummy"));
    clock.advance(Duration::from_secs(8));
    registry.touch_host(&mut graph, &clock, "web01");
    clock.advance(Duration::from_secs(8));

    let (_, hosts_pruned) = registry.prune(&mut graph, &clock);
    assert_eq!(hosts_pruned, 0);
}
