// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn shell_died_message_includes_reason() {
    let err = ExecError::ShellDied("broken pipe".to_string());
    assert_eq!(err.to_string(), "shell died mid-protocol: broken pipe");
}
