//! Error types and handling for relink-core operations.
//!
//! Errors are categorized for easier handling and include context about
//! recoverability. Per-note failures during a rewrite pass are expected to be
//! logged and skipped by the caller rather than aborting the whole pass; these
//! types only describe what went wrong, not the skip policy.

use thiserror::Error;

/// The main error type for relink-core operations.
///
/// All public fallible functions in relink-core return `Result<T, Error>`.
/// The error type includes automatic conversion from common standard library
/// errors and provides metadata for error handling logic.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers file system operations like reading or writing notes and the
    /// snapshot cache. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing operation failed.
    ///
    /// Occurs when note content cannot be interpreted as text, e.g. a note
    /// file that is not valid UTF-8. A rewrite pass skips such notes and
    /// continues with the rest of the corpus.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Vault storage operation failed.
    ///
    /// Covers failures beyond basic file I/O, such as note ids that would
    /// escape the vault root or a corrupt snapshot cache.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested note was not found in the vault.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    ///
    /// Occurs when converting the snapshot cache or config between formats.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for errors that are typically temporary, such as
    /// interrupted I/O. Parse and configuration failures are permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// Useful for grouping errors in logs.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
