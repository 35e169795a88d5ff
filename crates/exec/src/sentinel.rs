// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Random sentinel generation for the read/eval shell protocol (spec §4.3).

use rand::Rng;

/// A random 16-byte hex sentinel, unique per worker for the lifetime of
/// its persistent shell.
pub fn generate_sentinel() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[path = "sentinel_tests.rs"]
mod tests;
