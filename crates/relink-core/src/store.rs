//! The host-side document store the core collaborates with.
//!
//! The core never owns note storage: it reads snapshots, requests
//! overwrites, and reports outcomes through this trait. The prior-heading
//! snapshot cache is likewise owned by the host; the core only tells the
//! host when a notification has been fully processed so the cache can
//! advance.

use crate::{Error, Heading, NoteId, Result};
use std::collections::{BTreeMap, HashMap};

/// External document store and notification sink.
pub trait NoteStore {
    /// Read a note's current text.
    fn read(&self, id: &NoteId) -> Result<String>;

    /// Overwrite a note's content entirely.
    fn write(&mut self, id: &NoteId, text: &str) -> Result<()>;

    /// Enumerate the full corpus.
    fn list(&self) -> Result<Vec<NoteId>>;

    /// The note's heading structure as of its last known-good state.
    ///
    /// Notes never seen before report an empty snapshot.
    fn prior_headings(&self, id: &NoteId) -> Result<Vec<Heading>>;

    /// Advance the host's snapshot cache for `id` to `headings`.
    fn record_headings(&mut self, id: &NoteId, headings: &[Heading]) -> Result<()>;

    /// User-visible reporting of an aggregate outcome.
    fn notify(&mut self, message: &str);
}

/// In-memory vault used by tests and examples.
///
/// Captures every `notify` message so assertions can inspect the reports.
#[derive(Debug, Default)]
pub struct MemoryVault {
    notes: BTreeMap<NoteId, String>,
    snapshots: HashMap<NoteId, Vec<Heading>>,
    notices: Vec<String>,
    /// Ids whose reads should fail, for error-path tests.
    pub poisoned_reads: Vec<NoteId>,
    /// Ids whose writes should fail, for error-path tests.
    pub poisoned_writes: Vec<NoteId>,
}

impl MemoryVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a note without touching the snapshot cache.
    pub fn insert(&mut self, id: impl Into<NoteId>, text: impl Into<String>) {
        self.notes.insert(id.into(), text.into());
    }

    /// Current text of a note, if present.
    #[must_use]
    pub fn text(&self, id: &NoteId) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Every message reported through [`NoteStore::notify`], oldest first.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl NoteStore for MemoryVault {
    fn read(&self, id: &NoteId) -> Result<String> {
        if self.poisoned_reads.contains(id) {
            return Err(Error::Storage(format!("simulated read failure: {id}")));
        }
        self.notes
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn write(&mut self, id: &NoteId, text: &str) -> Result<()> {
        if self.poisoned_writes.contains(id) {
            return Err(Error::Storage(format!("simulated write failure: {id}")));
        }
        if !self.notes.contains_key(id) {
            return Err(Error::NotFound(id.to_string()));
        }
        self.notes.insert(id.clone(), text.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<NoteId>> {
        Ok(self.notes.keys().cloned().collect())
    }

    fn prior_headings(&self, id: &NoteId) -> Result<Vec<Heading>> {
        Ok(self.snapshots.get(id).cloned().unwrap_or_default())
    }

    fn record_headings(&mut self, id: &NoteId, headings: &[Heading]) -> Result<()> {
        self.snapshots.insert(id.clone(), headings.to_vec());
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_vault_read_write_list() {
        let mut vault = MemoryVault::new();
        vault.insert("A.md", "# One\n");
        vault.insert("B.md", "body\n");

        let ids = vault.list().expect("list");
        assert_eq!(ids, vec![NoteId::from("A.md"), NoteId::from("B.md")]);
        assert_eq!(vault.read(&NoteId::from("A.md")).expect("read"), "# One\n");

        vault.write(&NoteId::from("B.md"), "changed\n").expect("write");
        assert_eq!(vault.text(&NoteId::from("B.md")), Some("changed\n"));
    }

    #[test]
    fn test_missing_note_is_not_found() {
        let vault = MemoryVault::new();
        let err = vault.read(&NoteId::from("missing.md")).unwrap_err();
        assert_eq!(err.category(), "not_found");
    }

    #[test]
    fn test_unseen_note_has_empty_snapshot() {
        let vault = MemoryVault::new();
        assert!(vault.prior_headings(&NoteId::from("new.md")).expect("ok").is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut vault = MemoryVault::new();
        let id = NoteId::from("A.md");
        let headings = vec![Heading {
            text: "Intro".into(),
            level: 2,
            position: 0,
            note: id.clone(),
        }];
        vault.record_headings(&id, &headings).expect("record");
        assert_eq!(vault.prior_headings(&id).expect("read back"), headings);
    }
}
