// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `stagegate catalog` - Inspect and seed stored flow configs

use crate::output;
use anyhow::Result;
use clap::{Args, Subcommand};
use sg_core::default_catalog;
use sg_storage::FlowStore;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List stored flow configs
    List,
    /// Show the stages of a flow config
    Show {
        /// Flow config id
        id: String,
        /// Print the stages as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in "default" and "urgent" flow configs to the store
    Seed,
    /// Print the built-in fallback catalog as JSON
    Default,
}

pub fn handle(command: CatalogCommand, store: &FlowStore) -> Result<()> {
    match command {
        CatalogCommand::List => {
            let records = store.load()?;
            print!("{}", output::format_record_list(&records));
        }
        CatalogCommand::Show { id, json } => {
            let flow = match store.flow_config(&id) {
                Ok(flow) => flow,
                Err(e) => {
                    tracing::warn!(flow = %id, error = %e, "falling back to default catalog");
                    eprintln!("Flow config {id} unavailable ({e}); showing the default catalog");
                    default_catalog()
                }
            };
            if json {
                output::print_json(&flow)?;
            } else {
                print!("{}", output::format_flow_table(&flow));
            }
        }
        CatalogCommand::Seed => {
            let ids = store.seed_defaults()?;
            println!(
                "Seeded flow configs: {} ({})",
                ids.join(", "),
                store.path().display()
            );
        }
        CatalogCommand::Default => {
            output::print_json(&default_catalog())?;
        }
    }
    Ok(())
}
