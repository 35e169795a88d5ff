// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn builder_computes_execution_time() {
    let start = SystemTime::UNIX_EPOCH;
    let finish = start + Duration::from_secs(3);
    let result = CheckResultBuilder::new(CheckSubject::host("web01"), CheckType::Active)
        .return_code(0)
        .output("OK")
        .times(start, finish)
        .build();

    assert_eq!(result.execution_time, Duration::from_secs(3));
    assert_eq!(result.return_code, 0);
}

#[test]
fn subject_is_service_distinguishes_host_checks() {
    let host_subject = CheckSubject::host("web01");
    let svc_subject = CheckSubject::service("web01", "HTTP");

    assert!(!host_subject.is_service());
    assert!(svc_subject.is_service());
}
