//! # relink-core
//!
//! Core functionality for relink - automatic wiki-link repair for markdown
//! note vaults.
//!
//! When a section heading is renamed or cut from one note and pasted into
//! another, every `[[Note#Heading]]` reference to the old anchor goes stale.
//! This crate infers such moves from uncorrelated "a note changed"
//! notifications and rewrites every live reference across the corpus,
//! aliases preserved, without false positives or feedback loops.
//!
//! ## Architecture
//!
//! Four components compose into a pipeline, run once per notification:
//!
//! - **Heading extraction** ([`extract_headings`]): ATX heading records from
//!   note text
//! - **Change-set detection** ([`diff`]): multiset comparison of two heading
//!   sequences
//! - **Move correlation** ([`MoveCorrelator`]): pairing removals with
//!   additions across notifications under a deterministic tie-break
//! - **Link rewriting** ([`rewrite_corpus`]): corpus-wide reference repair
//!
//! [`HeadingSync`] wires them together against a host [`NoteStore`].
//!
//! ## Quick Start
//!
//! ```rust
//! use relink_core::{Config, HeadingSync, MemoryVault, NoteId, SyncOutcome};
//!
//! let mut vault = MemoryVault::new();
//! vault.insert("A.md", "## Intro\n");
//! vault.insert("B.md", "see [[A#Intro]]\n");
//!
//! let mut sync = HeadingSync::new(Config::default());
//! let a = NoteId::from("A.md");
//! sync.on_note_changed(&mut vault, &a)?; // establish the baseline
//!
//! vault.insert("A.md", "## Overview\n"); // the heading gets renamed
//! let outcome = sync.on_note_changed(&mut vault, &a)?;
//! assert!(matches!(outcome, SyncOutcome::Rewritten { .. }));
//! assert_eq!(vault.text(&NoteId::from("B.md")), Some("see [[A#Overview]]\n"));
//! # Ok::<(), relink_core::Error>(())
//! ```

/// Vault-level configuration
pub mod config;
/// Correlation of add/remove events into confirmed moves
pub mod correlate;
/// Change-set detection between heading sequences
pub mod diff;
/// Error types and result aliases
pub mod error;
/// Wiki-link scanning and text rewriting
pub mod links;
/// ATX heading extraction
pub mod parser;
/// The per-notification pipeline orchestrator
pub mod pipeline;
/// Corpus-wide link rewriting
pub mod rewrite;
/// The host document-store trait and an in-memory vault
pub mod store;
/// Filesystem-backed vault with a persisted snapshot cache
pub mod storage;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, CONFIG_FILE_NAME};
pub use correlate::{CorrelatorState, MoveCorrelator};
pub use diff::diff;
pub use error::{Error, Result};
pub use links::{rewrite_text, scan_links, LinkSpan, RewriteRule};
pub use parser::extract_headings;
pub use pipeline::HeadingSync;
pub use rewrite::{rewrite_corpus, RewriteReport};
pub use storage::FsVault;
pub use store::{MemoryVault, NoteStore};
pub use types::*;
