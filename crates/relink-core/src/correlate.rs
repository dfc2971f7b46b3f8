//! Correlation of uncorrelated add/remove events into confirmed moves.
//!
//! A heading move shows up as two facts that the change feed never ties
//! together: some note lost a heading, some note gained one. The
//! [`MoveCorrelator`] buffers at most one removal-side record and one
//! addition-side record across successive notifications and, once both are
//! present, pairs them under a deterministic tie-break policy.

use crate::{ChangeRecord, ConfirmedMove, Heading, MoveSet, NoteId};
use tracing::debug;

/// Logical fill state of the correlator's two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelatorState {
    /// Neither slot populated.
    Empty,
    /// Exactly one of the two slots populated.
    PartiallyFilled,
    /// Both slots populated; the next observation attempts correlation.
    Filled,
}

/// Stateful buffer pairing removed headings with added headings.
///
/// Owns its two slots as plain fields; whichever orchestrator drives the
/// event loop holds the single instance. A new notification for a role
/// overwrites the previous occupant of that slot - the latest event wins,
/// there is no queue.
#[derive(Debug, Default)]
pub struct MoveCorrelator {
    removed: Option<ChangeRecord>,
    added: Option<ChangeRecord>,
    clear_unmatched: bool,
}

impl MoveCorrelator {
    /// Create an empty correlator.
    ///
    /// When `clear_unmatched` is set, a correlation attempt that confirms
    /// zero pairs drains both slots instead of leaving them populated, so a
    /// stale removal cannot pair with an unrelated future addition.
    #[must_use]
    pub fn new(clear_unmatched: bool) -> Self {
        Self {
            removed: None,
            added: None,
            clear_unmatched,
        }
    }

    /// Current fill state.
    #[must_use]
    pub fn state(&self) -> CorrelatorState {
        match (&self.removed, &self.added) {
            (None, None) => CorrelatorState::Empty,
            (Some(_), Some(_)) => CorrelatorState::Filled,
            _ => CorrelatorState::PartiallyFilled,
        }
    }

    /// Record one notification's diffs and attempt correlation.
    ///
    /// Both checks are independent: a single edit can populate the addition
    /// slot and the removal slot at once. Empty diffs leave their slot
    /// untouched. Returns a [`MoveSet`] when at least one pair is confirmed,
    /// in which case both slots are drained.
    pub fn observe(
        &mut self,
        note: &NoteId,
        added: Vec<Heading>,
        removed: Vec<Heading>,
    ) -> Option<MoveSet> {
        if !removed.is_empty() {
            debug!(note = %note, count = removed.len(), "buffering removal-side record");
            self.removed = Some(ChangeRecord {
                note: note.clone(),
                headings: removed,
            });
        }
        if !added.is_empty() {
            debug!(note = %note, count = added.len(), "buffering addition-side record");
            self.added = Some(ChangeRecord {
                note: note.clone(),
                headings: added,
            });
        }
        self.try_correlate()
    }

    fn try_correlate(&mut self) -> Option<MoveSet> {
        let (removal, addition) = match (&self.removed, &self.added) {
            (Some(r), Some(a)) => (r, a),
            _ => return None,
        };

        let mut consumed = vec![false; removal.headings.len()];
        let mut moves = Vec::new();
        for add in &addition.headings {
            if let Some(index) = Self::find_match(&removal.headings, &consumed, add) {
                consumed[index] = true;
                let rem = &removal.headings[index];
                moves.push(ConfirmedMove {
                    note: rem.note.clone(),
                    old_heading: rem.text.clone(),
                    new_heading: add.text.clone(),
                    position: rem.position,
                });
            }
        }

        if moves.is_empty() {
            if self.clear_unmatched {
                debug!("correlation found no pairs; clearing both slots");
                self.removed = None;
                self.added = None;
            }
            return None;
        }

        let set = MoveSet {
            old_note: removal.note.clone(),
            new_note: addition.note.clone(),
            moves,
        };
        debug!(
            old = %set.old_note,
            new = %set.new_note,
            moves = set.moves.len(),
            "correlation confirmed moves"
        );
        self.removed = None;
        self.added = None;
        Some(set)
    }

    /// First removal matching `add` under the tie-break policy: a rename in
    /// place (same note, same position, different text) beats a cut-and-paste
    /// (different note, same text). Same note with same text is not a move.
    fn find_match(removed: &[Heading], consumed: &[bool], add: &Heading) -> Option<usize> {
        let rename = removed.iter().enumerate().position(|(i, rem)| {
            !consumed[i] && rem.note == add.note && rem.position == add.position && rem.text != add.text
        });
        if rename.is_some() {
            return rename;
        }
        removed
            .iter()
            .enumerate()
            .position(|(i, rem)| !consumed[i] && rem.note != add.note && rem.text == add.text)
    }
}
