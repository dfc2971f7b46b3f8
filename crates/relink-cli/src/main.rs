//! relink CLI - wiki-link repair for markdown note vaults
//!
//! This is the main entry point for the relink command-line interface.
//! Command implementations live in the `commands` module; this file only
//! wires argument parsing, logging, and dispatch together.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    match cli.command {
        Commands::Snapshot { vault } => commands::snapshot::execute(&vault),
        Commands::Status { vault } => commands::status::execute(&vault),
        Commands::Sync { vault } => commands::sync::execute(&vault),
    }
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
