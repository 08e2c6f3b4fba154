// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.log.level, "info");
    assert_eq!(config.engine.activity.max_attempts, 3);
    assert_eq!(
        config.engine.gates.test_timeout,
        Duration::from_secs(96 * 3600)
    );
}

#[test]
fn full_config_parses_durations() {
    let config = Config::parse(
        r#"
store = "flows.json"

[log]
level = "debug"
file = "stagegate.log"

[activity]
start_to_close = "5m"
max_attempts = 5
initial_interval = "2s"
backoff_coefficient = 1.5
max_interval = "1m"

[gates]
test_timeout = "48h"
"#,
    )
    .unwrap();

    assert_eq!(config.store, Some(PathBuf::from("flows.json")));
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.file, Some(PathBuf::from("stagegate.log")));
    assert_eq!(config.engine.activity.start_to_close, Duration::from_secs(300));
    assert_eq!(config.engine.activity.max_attempts, 5);
    assert_eq!(config.engine.activity.initial_interval, Duration::from_secs(2));
    assert_eq!(config.engine.activity.backoff_coefficient, 1.5);
    assert_eq!(config.engine.activity.max_interval, Duration::from_secs(60));
    assert_eq!(
        config.engine.gates.test_timeout,
        Duration::from_secs(48 * 3600)
    );
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::parse("[activity]\nmax_attempts = 1\n").unwrap();
    assert_eq!(config.engine.activity.max_attempts, 1);
    assert_eq!(config.engine.activity.max_interval, Duration::from_secs(100));
    assert_eq!(config.log.level, "info");
}

#[test]
fn invalid_toml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stagegate.toml");
    std::fs::write(&path, "[activity\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("stagegate.toml"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn configured_store_path_wins() {
    let config = Config {
        store: Some(PathBuf::from("/tmp/flows.json")),
        ..Config::default()
    };
    assert_eq!(config.store_path(), PathBuf::from("/tmp/flows.json"));
}
