//! CLI structure and argument parsing.
//!
//! A standard command-subcommand layout built with clap derive macros.
//! Global options apply to every command; each subcommand takes the vault
//! root it operates on.
//!
//! ```bash
//! # Record the baseline heading structure
//! relink snapshot --vault ~/notes
//!
//! # See which notes drifted
//! relink status --vault ~/notes
//!
//! # Detect moves and repair stale links
//! relink sync --vault ~/notes
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI for the `relink` command.
#[derive(Parser, Debug)]
#[command(
    name = "relink",
    version,
    about = "Repair wiki links automatically when note headings move"
)]
pub struct Cli {
    /// Enable verbose logging output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record the current heading structure of every note as the baseline
    Snapshot {
        /// Vault root directory
        #[arg(long, default_value = ".")]
        vault: PathBuf,
    },

    /// List notes whose heading structure drifted from the baseline
    Status {
        /// Vault root directory
        #[arg(long, default_value = ".")]
        vault: PathBuf,
    },

    /// Detect heading moves since the baseline and repair stale links
    Sync {
        /// Vault root directory
        #[arg(long, default_value = ".")]
        vault: PathBuf,
    },
}
