//! `relink status` - show heading drift without rewriting anything.

use super::{current_headings, drifted_notes};
use anyhow::Result;
use relink_core::{diff, Config, FsVault, NoteStore};
use std::path::Path;

/// List notes whose heading structure differs from the baseline.
pub fn execute(vault_dir: &Path) -> Result<()> {
    let config = Config::load_from_vault(vault_dir)?;
    let vault = FsVault::open(vault_dir)?;

    let drifted = drifted_notes(&vault, &config)?;
    if drifted.is_empty() {
        println!("No heading changes since the last snapshot");
        return Ok(());
    }

    for id in &drifted {
        let fresh = current_headings(&vault, id, &config)?;
        let prior = vault.prior_headings(id)?;
        let added = diff(&prior, &fresh).len();
        let removed = diff(&fresh, &prior).len();
        println!("{id}: +{added} -{removed}");
    }
    println!("{} note(s) drifted", drifted.len());
    Ok(())
}
