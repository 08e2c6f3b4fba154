//! CLI error specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    let temp = Project::empty();
    temp.sg().args(&["frobnicate"]).fails().code(2);
}

#[test]
fn run_requires_version() {
    let temp = Project::empty();
    temp.sg()
        .args(&["run"])
        .fails()
        .stderr_has("<VERSION>");
}

#[test]
fn invalid_config_is_reported() {
    let temp = Project::empty();
    let config = temp.file("stagegate.toml", "[activity\nmax_attempts = 3\n");
    temp.sg()
        .args(&["--config", config.to_str().unwrap(), "catalog", "list"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn missing_config_is_reported() {
    let temp = Project::empty();
    let missing = temp.path().join("nope.toml");
    temp.sg()
        .args(&["--config", missing.to_str().unwrap(), "catalog", "list"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn malformed_signal_script_is_reported() {
    let temp = Project::empty();
    let script = temp.file("signals.jsonl", "{\"kind\": \"approval\"}\n");
    temp.sg()
        .args(&["run", "v1", "--signals", script.to_str().unwrap()])
        .fails()
        .stderr_has("invalid signal on line 1");
}
