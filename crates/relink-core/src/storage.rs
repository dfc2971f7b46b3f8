//! Filesystem-backed vault.
//!
//! Notes are `.md` files under a root directory; hidden directories are not
//! part of the corpus. The prior-heading snapshot cache persists as JSON at
//! `.relink/headings.json` inside the vault, so detection state survives
//! across runs.

use crate::store::NoteStore;
use crate::{Error, Heading, NoteId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

const SNAPSHOT_DIR: &str = ".relink";
const SNAPSHOT_FILE: &str = "headings.json";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    updated_at: DateTime<Utc>,
    notes: BTreeMap<String, Vec<Heading>>,
}

/// A vault rooted at a directory on disk.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    snapshots: BTreeMap<String, Vec<Heading>>,
}

impl FsVault {
    /// Open a vault at `root`, loading the persisted snapshot cache if one
    /// exists.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Storage(format!(
                "vault root is not a directory: {}",
                root.display()
            )));
        }
        let snapshots = Self::load_snapshots(&root)?;
        debug!(root = %root.display(), cached = snapshots.len(), "opened vault");
        Ok(Self { root, snapshots })
    }

    /// The vault root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(root: &Path) -> PathBuf {
        root.join(SNAPSHOT_DIR).join(SNAPSHOT_FILE)
    }

    fn load_snapshots(root: &Path) -> Result<BTreeMap<String, Vec<Heading>>> {
        let path = Self::snapshot_path(root);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&path)?;
        let file: SnapshotFile = serde_json::from_str(&raw)
            .map_err(|e| Error::Storage(format!("corrupt snapshot cache: {e}")))?;
        Ok(file.notes)
    }

    fn persist_snapshots(&self) -> Result<()> {
        let dir = self.root.join(SNAPSHOT_DIR);
        fs::create_dir_all(&dir)?;
        let file = SnapshotFile {
            updated_at: Utc::now(),
            notes: self.snapshots.clone(),
        };
        let raw = serde_json::to_string_pretty(&file)?;
        fs::write(Self::snapshot_path(&self.root), raw)?;
        Ok(())
    }

    /// Resolve a note id to a path, refusing ids that would escape the root.
    fn note_path(&self, id: &NoteId) -> Result<PathBuf> {
        let rel = Path::new(id.as_str());
        let escapes = id.as_str().is_empty()
            || rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(Error::Storage(format!("note id escapes the vault root: {id}")));
        }
        Ok(self.root.join(rel))
    }

    fn collect_notes(dir: &Path, root: &Path, out: &mut Vec<NoteId>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                Self::collect_notes(&path, root, out)?;
            } else if path.extension().and_then(|e| e.to_str()) == Some("md") {
                let rel = path.strip_prefix(root).map_err(|_| {
                    Error::Storage(format!("path outside vault root: {}", path.display()))
                })?;
                out.push(NoteId::new(rel.to_string_lossy().replace('\\', "/")));
            }
        }
        Ok(())
    }
}

impl NoteStore for FsVault {
    fn read(&self, id: &NoteId) -> Result<String> {
        let path = self.note_path(id)?;
        if !path.is_file() {
            return Err(Error::NotFound(id.to_string()));
        }
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                Error::Parse(format!("note is not valid UTF-8: {id}"))
            } else {
                Error::Io(e)
            }
        })
    }

    fn write(&mut self, id: &NoteId, text: &str) -> Result<()> {
        let path = self.note_path(id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<NoteId>> {
        let mut notes = Vec::new();
        Self::collect_notes(&self.root, &self.root, &mut notes)?;
        notes.sort();
        Ok(notes)
    }

    fn prior_headings(&self, id: &NoteId) -> Result<Vec<Heading>> {
        Ok(self.snapshots.get(id.as_str()).cloned().unwrap_or_default())
    }

    fn record_headings(&mut self, id: &NoteId, headings: &[Heading]) -> Result<()> {
        self.snapshots.insert(id.as_str().to_string(), headings.to_vec());
        self.persist_snapshots()
    }

    fn notify(&mut self, message: &str) {
        info!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_with(notes: &[(&str, &str)]) -> (tempfile::TempDir, FsVault) {
        let dir = tempfile::tempdir().expect("tempdir");
        for (rel, text) in notes {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("mkdir");
            }
            fs::write(path, text).expect("seed note");
        }
        let vault = FsVault::open(dir.path()).expect("open");
        (dir, vault)
    }

    #[test]
    fn test_list_finds_markdown_recursively_sorted() {
        let (_dir, vault) = vault_with(&[
            ("b.md", ""),
            ("a.md", ""),
            ("sub/deep/c.md", ""),
            ("sub/ignored.txt", ""),
        ]);
        let ids: Vec<String> = vault
            .list()
            .expect("list")
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["a.md", "b.md", "sub/deep/c.md"]);
    }

    #[test]
    fn test_hidden_directories_are_not_corpus() {
        let (_dir, vault) = vault_with(&[("a.md", ""), (".trash/old.md", "")]);
        let ids = vault.list().expect("list");
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].as_str(), "a.md");
    }

    #[test]
    fn test_read_write_round_trip() {
        let (_dir, mut vault) = vault_with(&[("a.md", "# One\n")]);
        let id = NoteId::from("a.md");
        assert_eq!(vault.read(&id).expect("read"), "# One\n");
        vault.write(&id, "# Two\n").expect("write");
        assert_eq!(vault.read(&id).expect("reread"), "# Two\n");
    }

    #[test]
    fn test_non_utf8_note_is_parse_error() {
        let (dir, vault) = vault_with(&[("a.md", "")]);
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, b'#']).expect("seed bytes");
        let err = vault.read(&NoteId::from("binary.md")).unwrap_err();
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_traversal_ids_rejected() {
        let (_dir, vault) = vault_with(&[("a.md", "")]);
        for bad in ["../outside.md", "/etc/passwd", ""] {
            let err = vault.read(&NoteId::from(bad)).unwrap_err();
            assert_eq!(err.category(), "storage", "id {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_snapshots_persist_across_reopen() {
        let (dir, mut vault) = vault_with(&[("a.md", "## Intro\n")]);
        let id = NoteId::from("a.md");
        let headings = vec![Heading {
            text: "Intro".into(),
            level: 2,
            position: 0,
            note: id.clone(),
        }];
        vault.record_headings(&id, &headings).expect("record");
        drop(vault);

        let reopened = FsVault::open(dir.path()).expect("reopen");
        assert_eq!(reopened.prior_headings(&id).expect("cached"), headings);
    }

    #[test]
    fn test_corrupt_snapshot_cache_is_storage_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_dir = dir.path().join(SNAPSHOT_DIR);
        fs::create_dir_all(&cache_dir).expect("mkdir");
        fs::write(cache_dir.join(SNAPSHOT_FILE), "{broken").expect("write");
        let err = FsVault::open(dir.path()).unwrap_err();
        assert_eq!(err.category(), "storage");
    }
}
