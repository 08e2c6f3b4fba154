// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use serde::Serialize;
use sg_core::{FlowConfig, TimelineStatus};
use sg_engine::{RunOutcome, RunSnapshot};
use sg_storage::FlowConfigRecord;
use std::fmt::Write;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Final report of a run: status line, message and per-stage timeline
pub fn format_run(outcome: &RunOutcome, snapshot: &RunSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Run: {}", outcome.run_id);
    let _ = writeln!(out, "  Status: {}", outcome.status);
    let _ = writeln!(out, "  Stage: {}", outcome.state.current_stage);
    let _ = writeln!(out, "  Message: {}", outcome.message);
    if !snapshot.stages.is_empty() {
        let _ = writeln!(out, "  Stages:");
        for stage in &snapshot.stages {
            let marker = snapshot
                .timeline
                .iter()
                .find(|entry| entry.key == stage.key)
                .map_or("[-]", |entry| timeline_marker(entry.status));
            let _ = writeln!(
                out,
                "    {} {:<16} {:<28} {}",
                marker, stage.key, stage.name, stage.status
            );
        }
    }
    out
}

pub fn format_flow_table(flow: &FlowConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<16} {:<28} {:<9} {:>8} {:<9} ENABLED",
        "ORDER", "KEY", "NAME", "TYPE", "TIMEOUT", "AUTO_PASS"
    );
    for stage in flow.stages() {
        let _ = writeln!(
            out,
            "{:<6} {:<16} {:<28} {:<9} {:>7}h {:<9} {}",
            stage.order,
            stage.key,
            stage.name,
            stage.kind.name(),
            stage.timeout.as_secs() / 3600,
            if stage.auto_pass { "yes" } else { "no" },
            if stage.enabled { "yes" } else { "no" },
        );
    }
    out
}

pub fn format_record_list(records: &[FlowConfigRecord]) -> String {
    if records.is_empty() {
        return "No flow configs\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:<24} {:>6} DEFAULT", "ID", "NAME", "STAGES");
    for record in records {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>6} {}",
            record.id,
            record.name,
            record.stages.len(),
            if record.is_default { "*" } else { "" }
        );
    }
    out
}

/// One-line progress marker for a timeline entry
pub fn timeline_marker(status: TimelineStatus) -> &'static str {
    match status {
        TimelineStatus::Completed => "[x]",
        TimelineStatus::InProgress => "[>]",
        TimelineStatus::Pending => "[ ]",
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
