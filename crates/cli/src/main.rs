// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagegate - release-approval orchestrator CLI

mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{catalog, run};
use sg_storage::FlowStore;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "stagegate",
    version,
    about = "stagegate - Drive software upgrades through gated approval stages"
)]
struct Cli {
    /// Path to stagegate.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Flow-config store file (overrides the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one version through its flow, feeding it a signal script
    Run(run::RunArgs),
    /// Flow config management
    Catalog(catalog::CatalogArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let _log_guard = logging::setup_logging(&config.log)?;

    let store = FlowStore::new(cli.store.clone().unwrap_or_else(|| config.store_path()));

    match cli.command {
        Commands::Run(args) => run::handle(args, &config, store).await,
        Commands::Catalog(args) => {
            catalog::handle(args.command, &store)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
