//! Core data types for heading-move detection and link rewriting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a note: its vault-relative path, e.g. `notes/a.md`.
///
/// Internal records key on this id rather than on the display basename, so
/// two notes sharing a basename cannot be confused before the rewrite-string
/// boundary. The basename is projected out only when building link text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create an id from a vault-relative path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The vault-relative path as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display basename without the `.md` extension, the form wiki links use.
    #[must_use]
    pub fn basename(&self) -> &str {
        let name = self.0.rsplit('/').next().unwrap_or(&self.0);
        name.strip_suffix(".md").unwrap_or(name)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for NoteId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// One ATX heading extracted from a note.
///
/// Immutable once extracted. Heading text is not unique within a note;
/// duplicates are legal and handled by multiset diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text with the `#` markers and surrounding whitespace stripped.
    pub text: String,
    /// ATX level, 1 through 6.
    pub level: u8,
    /// Zero-based line index within the note.
    pub position: usize,
    /// The note this heading was extracted from.
    pub note: NoteId,
}

/// One side of a pending correlation: the headings a single notification
/// added to or removed from one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The note the change was observed in.
    pub note: NoteId,
    /// The added (or removed) headings, in document order.
    pub headings: Vec<Heading>,
}

/// A heading rename and/or relocation inferred with enough confidence to
/// trigger link rewriting. Consumed entirely by one rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedMove {
    /// The note the heading was removed from.
    pub note: NoteId,
    /// Heading text before the move.
    pub old_heading: String,
    /// Heading text after the move.
    pub new_heading: String,
    /// Line index the heading occupied before the move.
    pub position: usize,
}

/// The full outcome of one successful correlation: which note lost headings,
/// which note gained them, and the confirmed pairs.
///
/// For a rename in place, `old_note` and `new_note` are the same note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSet {
    /// Removal-side note.
    pub old_note: NoteId,
    /// Addition-side note.
    pub new_note: NoteId,
    /// Confirmed moves, in addition-side order.
    pub moves: Vec<ConfirmedMove>,
}

/// What one change notification amounted to, for callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The notification arrived during a rewrite pass and was dropped.
    Suppressed,
    /// No heading differences; the pending buffer was left untouched.
    Unchanged,
    /// Differences were buffered, awaiting the counterpart notification.
    Buffered,
    /// Moves were confirmed and the corpus rewritten.
    Rewritten {
        /// Number of confirmed moves in the set.
        moves: usize,
        /// Notes whose text actually changed and was written back.
        notes_modified: usize,
        /// Individual link tokens replaced across the corpus.
        links_replaced: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_basename() {
        assert_eq!(NoteId::from("A.md").basename(), "A");
        assert_eq!(NoteId::from("notes/deep/B.md").basename(), "B");
        assert_eq!(NoteId::from("plain").basename(), "plain");
        assert_eq!(NoteId::from("dir/plain").basename(), "plain");
    }

    #[test]
    fn test_note_id_ordering_is_path_ordering() {
        let mut ids = vec![NoteId::from("b.md"), NoteId::from("a/z.md"), NoteId::from("a.md")];
        ids.sort();
        let paths: Vec<&str> = ids.iter().map(NoteId::as_str).collect();
        assert_eq!(paths, vec!["a.md", "a/z.md", "b.md"]);
    }

    #[test]
    fn test_heading_serde_round_trip() {
        let heading = Heading {
            text: "Intro".to_string(),
            level: 2,
            position: 4,
            note: NoteId::from("A.md"),
        };
        let json = serde_json::to_string(&heading).expect("serialize");
        let back: Heading = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, heading);
    }
}
