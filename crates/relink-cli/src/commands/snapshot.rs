//! `relink snapshot` - record the baseline heading structure.

use super::current_headings;
use anyhow::Result;
use relink_core::{Config, FsVault, NoteStore};
use std::path::Path;
use tracing::warn;

/// Record every note's current heading structure as the known-good state.
pub fn execute(vault_dir: &Path) -> Result<()> {
    let config = Config::load_from_vault(vault_dir)?;
    let mut vault = FsVault::open(vault_dir)?;

    let mut recorded = 0usize;
    for id in vault.list()? {
        let headings = match current_headings(&vault, &id, &config) {
            Ok(headings) => headings,
            Err(e) => {
                warn!(note = %id, error = %e, "skipping unreadable note");
                continue;
            },
        };
        vault.record_headings(&id, &headings)?;
        recorded += 1;
    }

    println!("Recorded heading snapshots for {recorded} note(s)");
    Ok(())
}
