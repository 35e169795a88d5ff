// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn mask_for_selects_the_right_field() {
    let dep = Dependency {
        master: CheckSubject::host("router1"),
        dependent: CheckSubject::host("web01"),
        notification_failure_mask: DependencyMask::DOWN,
        execution_failure_mask: DependencyMask::empty(),
        inherits_parent: false,
        dependency_period: None,
    };

    assert_eq!(dep.mask_for(DependencyKind::Notification), DependencyMask::DOWN);
    assert_eq!(dep.mask_for(DependencyKind::Execution), DependencyMask::empty());
}
