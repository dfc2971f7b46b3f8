//! The per-notification pipeline: extract, diff, correlate, rewrite.
//!
//! One [`HeadingSync`] instance owns the correlator and drives the whole
//! flow synchronously for each change notification. Overwrites issued during
//! a rewrite pass make the host emit further change notifications; the
//! `rewriting` flag is the structural re-entrancy guard that drops any
//! notification dispatched while a pass is active, so a rewrite can never
//! correlate against its own output.

use crate::correlate::MoveCorrelator;
use crate::store::NoteStore;
use crate::{diff, extract_headings, rewrite_corpus, Config, NoteId, Result, SyncOutcome};
use tracing::{debug, info};

/// Orchestrator for heading-move detection and link repair.
pub struct HeadingSync {
    config: Config,
    correlator: MoveCorrelator,
    rewriting: bool,
}

impl HeadingSync {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let correlator = MoveCorrelator::new(config.clear_unmatched);
        Self {
            config,
            correlator,
            rewriting: false,
        }
    }

    /// Whether a rewrite pass is currently active.
    #[must_use]
    pub const fn is_rewriting(&self) -> bool {
        self.rewriting
    }

    /// Fill state of the pending-move buffer.
    #[must_use]
    pub fn correlator_state(&self) -> crate::CorrelatorState {
        self.correlator.state()
    }

    /// Process one "note changed" notification.
    ///
    /// Reads the note's current text, diffs its headings against the host's
    /// prior snapshot, feeds the correlator, and - when moves are confirmed -
    /// runs a corpus-wide rewrite pass and reports the modified-note count
    /// through the store's notifier. The fresh heading structure is recorded
    /// back to the host in every case except suppression.
    pub fn on_note_changed<S: NoteStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &NoteId,
    ) -> Result<SyncOutcome> {
        if self.rewriting {
            debug!(note = %id, "dropping notification during rewrite pass");
            return Ok(SyncOutcome::Suppressed);
        }

        let text = store.read(id)?;
        let mut fresh = extract_headings(&text, id);
        fresh.retain(|h| h.level <= self.config.max_heading_level);
        let prior = store.prior_headings(id)?;

        let added = diff(&prior, &fresh);
        let removed = diff(&fresh, &prior);
        if added.is_empty() && removed.is_empty() {
            // No structural change; the pending buffer stays untouched.
            store.record_headings(id, &fresh)?;
            return Ok(SyncOutcome::Unchanged);
        }

        let outcome = match self.correlator.observe(id, added, removed) {
            Some(set) => {
                let move_count = set.moves.len();
                info!(
                    old = %set.old_note,
                    new = %set.new_note,
                    moves = move_count,
                    "confirmed heading moves; rewriting corpus"
                );
                self.rewriting = true;
                let result = rewrite_corpus(store, &set, &self.config.ignore);
                self.rewriting = false;
                let report = result?;
                store.notify(&format!(
                    "relink: updated wiki links in {} note(s)",
                    report.notes_modified
                ));
                SyncOutcome::Rewritten {
                    moves: move_count,
                    notes_modified: report.notes_modified,
                    links_replaced: report.links_replaced,
                }
            },
            None => SyncOutcome::Buffered,
        };

        store.record_headings(id, &fresh)?;
        Ok(outcome)
    }

    #[cfg(test)]
    pub(crate) fn force_rewriting(&mut self, active: bool) {
        self.rewriting = active;
    }
}
