//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.sg()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("catalog")
        .stdout_has("--config");
}

#[test]
fn run_help_lists_signal_script() {
    let temp = Project::empty();
    temp.sg()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("<VERSION>")
        .stdout_has("--signals")
        .stdout_has("--flow");
}

#[test]
fn catalog_help_lists_commands() {
    let temp = Project::empty();
    temp.sg()
        .args(&["catalog", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("seed");
}
