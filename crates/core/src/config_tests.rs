// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_match_documented_legacy_values() {
    let config = EngineConfig::default();
    assert_eq!(config.interval_length, 60.0);
    assert!(!config.translate_passive_host_checks);
    assert!(config.nrdp_loopback_bypass);
}

#[test]
fn deserializes_partial_toml_with_defaults_filled_in() {
    let config: EngineConfig = toml::from_str(
        r#"
        interval_length = 30.0
        nrdp_enabled = false
        "#,
    )
    .expect("valid toml");

    assert_eq!(config.interval_length, 30.0);
    assert!(!config.nrdp_enabled);
    // Untouched fields keep their defaults.
    assert_eq!(config.check_reaper_interval, Duration::from_secs(10));
}
