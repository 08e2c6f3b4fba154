// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `stagegate run` - Drive one version through its flow

use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use sg_adapters::{
    LogArchiveAdapter, LogNotifyAdapter, StoreCatalogAdapter, TracedArchiveAdapter,
    TracedCatalogAdapter, TracedNotifyAdapter,
};
use sg_core::{RunStatus, Signal, SystemClock};
use sg_engine::{RunOutcome, RunRequest, RunSnapshot, Runtime, RuntimeDeps, RuntimeError};
use sg_storage::FlowStore;
use std::io::Read;
use std::process::ExitCode;

#[derive(Args)]
pub struct RunArgs {
    /// Version id; the run is named `upgrade-<version>`
    pub version: String,

    /// Human-readable version name used in notifications
    #[arg(long)]
    pub name: Option<String>,

    /// Upgrade item ids carried by the run
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// Flow config id; the store's default flow when omitted
    #[arg(long)]
    pub flow: Option<String>,

    /// JSON-lines signal script, or `-` for stdin
    #[arg(long)]
    pub signals: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    outcome: &'a RunOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    run: &'a RunSnapshot,
}

pub async fn handle(args: RunArgs, config: &Config, store: FlowStore) -> Result<ExitCode> {
    let signals = match &args.signals {
        Some(source) => read_script(source)?,
        None => Vec::new(),
    };

    let runtime = Runtime::new(
        RuntimeDeps {
            catalog: TracedCatalogAdapter::new(StoreCatalogAdapter::new(store)),
            notify: TracedNotifyAdapter::new(LogNotifyAdapter::new()),
            archive: TracedArchiveAdapter::new(LogArchiveAdapter::new()),
        },
        config.engine.clone(),
        SystemClock,
    );

    let mut request = RunRequest::new(args.version.as_str()).with_items(args.items);
    if let Some(name) = args.name {
        request = request.with_name(name);
    }
    if let Some(flow) = args.flow {
        request = request.with_flow(flow);
    }

    let run_id = runtime.start(request)?;
    let total = signals.len();
    for (delivered, signal) in signals.into_iter().enumerate() {
        match runtime.signal(&run_id, signal) {
            Ok(()) => {}
            // The run ended mid-script; its outcome is reported below
            Err(RuntimeError::RunNotActive(_)) => {
                tracing::debug!(
                    %run_id,
                    delivered,
                    remaining = total - delivered,
                    "run finished before the signal script was fully delivered"
                );
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let (outcome, error) = match runtime.wait(&run_id).await {
        Ok(outcome) => (outcome, None),
        Err(RuntimeError::Flow(e)) => {
            // Outcome of an errored run comes from its final state
            let outcome = runtime.wait(&run_id).await?;
            (outcome, Some(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot = runtime.describe(&run_id)?;

    if args.json {
        output::print_json(&RunReport {
            outcome: &outcome,
            error,
            run: &snapshot,
        })?;
    } else {
        print!("{}", output::format_run(&outcome, &snapshot));
        if let Some(error) = error {
            eprintln!("Error: {error}");
        }
    }

    Ok(if outcome.status == RunStatus::Completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_script(source: &str) -> Result<Vec<Signal>> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read signals from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read signal script {source}"))?
    };
    parse_script(&content)
}

/// Parse a JSON-lines signal script. Blank lines and `#` comments are skipped.
pub fn parse_script(content: &str) -> Result<Vec<Signal>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("invalid signal on line {}", index + 1))
        })
        .collect()
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
