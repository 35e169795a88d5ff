// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn pool_closed_has_a_stable_message() {
    assert_eq!(
        EngineError::PoolClosed.to_string(),
        "execution pool is shutting down"
    );
}
