//! Behavioral tests for the stagegate CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// catalog/
#[path = "specs/catalog/commands.rs"]
mod catalog_commands;

// run/
#[path = "specs/run/flow.rs"]
mod run_flow;
