//! Corpus-wide link rewriting for a set of confirmed moves.
//!
//! Every note in the store is scanned, including the two notes directly
//! involved in the move; self-references are ordinary stale links. A note
//! that fails to read or write is skipped with a warning and the pass
//! continues, so the reported counts reflect what actually happened.

use crate::links::{rewrite_text, RewriteRule};
use crate::store::NoteStore;
use crate::{MoveSet, Result};
use tracing::{debug, warn};

/// Totals for one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Notes whose text changed and was successfully written back.
    pub notes_modified: usize,
    /// Individual link tokens replaced, summed over modified notes.
    pub links_replaced: usize,
    /// Notes skipped because a read or write failed.
    pub notes_skipped: usize,
}

/// Rewrite every live reference to the moved headings across the corpus.
///
/// `ignore` holds note-id prefixes excluded from the scan. Corpus
/// enumeration failure aborts the pass; per-note failures do not.
pub fn rewrite_corpus<S: NoteStore + ?Sized>(
    store: &mut S,
    set: &MoveSet,
    ignore: &[String],
) -> Result<RewriteReport> {
    // Identity is projected to basenames only here, at the string boundary.
    let old_note = set.old_note.basename();
    let new_note = set.new_note.basename();
    let rules: Vec<RewriteRule<'_>> = set
        .moves
        .iter()
        .map(|m| RewriteRule {
            old_note,
            new_note,
            old_heading: &m.old_heading,
            new_heading: &m.new_heading,
        })
        .collect();

    let mut report = RewriteReport::default();
    for id in store.list()? {
        if ignore.iter().any(|prefix| id.as_str().starts_with(prefix)) {
            continue;
        }
        let text = match store.read(&id) {
            Ok(text) => text,
            Err(e) => {
                warn!(note = %id, error = %e, "skipping unreadable note");
                report.notes_skipped += 1;
                continue;
            },
        };
        let Some((new_text, replaced)) = rewrite_text(&text, &rules) else {
            continue;
        };
        match store.write(&id, &new_text) {
            Ok(()) => {
                debug!(note = %id, links = replaced, "rewrote links");
                report.notes_modified += 1;
                report.links_replaced += replaced;
            },
            Err(e) => {
                warn!(note = %id, error = %e, "skipping note that failed to write");
                report.notes_skipped += 1;
            },
        }
    }
    Ok(report)
}
