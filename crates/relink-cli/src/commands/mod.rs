//! Command implementations.

pub mod snapshot;
pub mod status;
pub mod sync;

use anyhow::Result;
use relink_core::{diff, extract_headings, Config, Heading, NoteId, NoteStore};
use tracing::warn;

/// Extract a note's headings the way the pipeline sees them: capped at the
/// configured maximum level.
fn current_headings<S: NoteStore + ?Sized>(
    store: &S,
    id: &NoteId,
    config: &Config,
) -> relink_core::Result<Vec<Heading>> {
    let text = store.read(id)?;
    let mut headings = extract_headings(&text, id);
    headings.retain(|h| h.level <= config.max_heading_level);
    Ok(headings)
}

/// Notes whose heading structure differs from the recorded baseline, in
/// sorted id order. Unreadable notes are skipped with a warning.
fn drifted_notes<S: NoteStore + ?Sized>(store: &S, config: &Config) -> Result<Vec<NoteId>> {
    let mut drifted = Vec::new();
    for id in store.list()? {
        let fresh = match current_headings(store, &id, config) {
            Ok(headings) => headings,
            Err(e) => {
                warn!(note = %id, error = %e, "skipping unreadable note");
                continue;
            },
        };
        let prior = store.prior_headings(&id)?;
        if !diff(&prior, &fresh).is_empty() || !diff(&fresh, &prior).is_empty() {
            drifted.push(id);
        }
    }
    Ok(drifted)
}
