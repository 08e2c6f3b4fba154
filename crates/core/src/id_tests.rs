// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn run_id_renders_with_prefix() {
    let id = RunId::for_version("V202601-001");
    assert_eq!(id.to_string(), "upgrade-V202601-001");
    assert_eq!(id.prefix(), "upgrade");
    assert_eq!(id.version().as_str(), "V202601-001");
}

#[test]
fn run_id_parses_version_with_dashes() {
    let id: RunId = "upgrade-V202601-001".parse().unwrap();
    assert_eq!(id.version(), &VersionId::from("V202601-001"));
    assert_eq!(id, RunId::for_version("V202601-001"));
}

#[parameterized(
    no_prefix = { "V202601-001" },
    wrong_prefix = { "release-V1" },
    prefix_without_dash = { "upgradeV1" },
    empty = { "" },
)]
fn run_id_rejects_foreign_names(input: &str) {
    assert!(matches!(
        input.parse::<RunId>(),
        Err(RunIdError::MissingPrefix(_))
    ));
}

#[test]
fn run_id_rejects_empty_version() {
    assert_eq!(
        "upgrade-".parse::<RunId>(),
        Err(RunIdError::EmptyVersion("upgrade-".to_string()))
    );
}

#[test]
fn run_id_serializes_as_string() {
    let id = RunId::for_version("V7");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"upgrade-V7\"");
    let back: RunId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
