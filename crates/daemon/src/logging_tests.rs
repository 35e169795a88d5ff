// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rotation_is_a_no_op_below_the_size_threshold() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("monitord.log");
    std::fs::write(&log_path, b"small").unwrap();
    rotate_log_if_needed(&log_path);
    assert!(log_path.exists());
    assert!(!tmp.path().join("monitord.log.1").exists());
}

#[test]
fn rotation_is_a_no_op_for_a_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let log_path = tmp.path().join("missing.log");
    rotate_log_if_needed(&log_path);
    assert!(!log_path.exists());
}

#[test]
fn startup_marker_is_appended_with_the_current_pid() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config {
        state_dir: tmp.path().to_path_buf(),
        ..Config::default()
    };
    config.log_path = tmp.path().join("monitord.log");

    write_startup_marker(&config).unwrap();
    let contents = std::fs::read_to_string(&config.log_path).unwrap();
    assert!(contents.contains(&std::process::id().to_string()));
}
