//! `relink sync` - the notification source driving the pipeline.
//!
//! Each drifted note is turned into one change notification, delivered in
//! sorted id order. The pipeline buffers one-sided changes until the
//! counterpart arrives, so a cut in one note and a paste in another are
//! correlated within a single run.

use super::drifted_notes;
use anyhow::Result;
use relink_core::{Config, CorrelatorState, FsVault, HeadingSync, SyncOutcome};
use std::path::Path;

/// Detect heading moves since the baseline and repair stale links.
pub fn execute(vault_dir: &Path) -> Result<()> {
    let config = Config::load_from_vault(vault_dir)?;
    let mut vault = FsVault::open(vault_dir)?;
    let mut sync = HeadingSync::new(config.clone());

    let drifted = drifted_notes(&vault, &config)?;
    if drifted.is_empty() {
        println!("No heading changes since the last snapshot");
        return Ok(());
    }

    let mut rewrites = 0usize;
    for id in &drifted {
        match sync.on_note_changed(&mut vault, id)? {
            SyncOutcome::Rewritten {
                moves,
                notes_modified,
                links_replaced,
            } => {
                rewrites += 1;
                println!(
                    "{id}: confirmed {moves} move(s), rewrote {links_replaced} link(s) in {notes_modified} note(s)"
                );
            },
            SyncOutcome::Buffered | SyncOutcome::Unchanged | SyncOutcome::Suppressed => {},
        }
    }

    if rewrites == 0 {
        println!("Processed {} changed note(s); no moves confirmed", drifted.len());
    }
    if sync.correlator_state() != CorrelatorState::Empty {
        println!("Some changes are buffered awaiting a matching counterpart");
    }
    Ok(())
}
