// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycle-safe dependency evaluation (spec §4.8).

use monitor_core::{
    CheckSubject, Dependency, DependencyKind, DependencyMask, EngineConfig, HostState, ServiceState,
    StateType, TimeperiodName,
};
use std::collections::HashSet;
use std::time::SystemTime;

/// The state a dependency master is in, reduced to whichever of current or
/// last-hard applies under the configured dependency-evaluation policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubjectState {
    Host {
        current: HostState,
        last_hard_state: HostState,
        state_type: StateType,
    },
    Service {
        current: ServiceState,
        last_hard_state: ServiceState,
        state_type: StateType,
    },
}

impl SubjectState {
    fn mask_bit(&self, soft_state_dependencies: bool) -> DependencyMask {
        match *self {
            SubjectState::Host {
                current,
                last_hard_state,
                state_type,
            } => {
                let state = if soft_state_dependencies || state_type == StateType::Hard {
                    current
                } else {
                    last_hard_state
                };
                match state {
                    HostState::Up => DependencyMask::empty(),
                    HostState::Down => DependencyMask::DOWN,
                    HostState::Unreachable => DependencyMask::UNREACHABLE,
                }
            }
            SubjectState::Service {
                current,
                last_hard_state,
                state_type,
            } => {
                let state = if soft_state_dependencies || state_type == StateType::Hard {
                    current
                } else {
                    last_hard_state
                };
                match state {
                    ServiceState::Ok => DependencyMask::empty(),
                    ServiceState::Warning => DependencyMask::WARNING,
                    ServiceState::Unknown => DependencyMask::UNKNOWN,
                    ServiceState::Critical => DependencyMask::CRITICAL,
                }
            }
        }
    }
}

/// Read-only view over the object graph's dependency edges and object
/// state, narrow enough for the scheduler to implement directly against
/// its `ObjectGraph` lock guard.
pub trait DependencyGraph {
    /// Edges of `kind` whose `dependent` is `subject`.
    fn edges_for(&self, subject: &CheckSubject, kind: DependencyKind) -> Vec<Dependency>;
    fn state_of(&self, subject: &CheckSubject) -> Option<SubjectState>;
    fn in_period(&self, period: Option<&TimeperiodName>, at: SystemTime) -> bool;
}

/// True if `subject`'s notifications (or execution) are blocked by a
/// failed dependency, per spec §4.8.
pub fn dependency_fails(
    graph: &dyn DependencyGraph,
    subject: &CheckSubject,
    kind: DependencyKind,
    config: &EngineConfig,
    at: SystemTime,
) -> bool {
    let mut visited = HashSet::new();
    visited.insert(subject.clone());
    fails_with_visited(graph, subject, kind, config, at, &mut visited)
}

fn fails_with_visited(
    graph: &dyn DependencyGraph,
    subject: &CheckSubject,
    kind: DependencyKind,
    config: &EngineConfig,
    at: SystemTime,
    visited: &mut HashSet<CheckSubject>,
) -> bool {
    for dep in graph.edges_for(subject, kind) {
        let mask = dep.mask_for(kind);
        if mask.is_empty() {
            continue;
        }
        if !graph.in_period(dep.dependency_period.as_ref(), at) {
            continue;
        }
        if !visited.insert(dep.master.clone()) {
            continue;
        }
        let Some(state) = graph.state_of(&dep.master) else {
            continue;
        };
        if mask.intersects(state.mask_bit(config.soft_state_dependencies)) {
            return true;
        }
        if dep.inherits_parent && fails_with_visited(graph, &dep.master, kind, config, at, visited) {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "dependency_eval_tests.rs"]
mod tests;
