// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn sentinel_is_32_hex_characters() {
    let sentinel = generate_sentinel();
    assert_eq!(sentinel.len(), 32);
    assert!(sentinel.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn sentinels_are_not_trivially_repeated() {
    let a = generate_sentinel();
    let b = generate_sentinel();
    assert_ne!(a, b);
}
