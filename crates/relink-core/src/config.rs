//! Vault-level configuration.
//!
//! Stored as TOML at `<vault>/.relink.toml`. A missing file yields the
//! defaults; a malformed file is a configuration error rather than a silent
//! fallback.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the per-vault configuration file.
pub const CONFIG_FILE_NAME: &str = ".relink.toml";

/// Settings controlling detection and rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Drain the pending-move buffer after a correlation attempt that
    /// confirms nothing, so stale records cannot pair with unrelated future
    /// changes. Off by default.
    pub clear_unmatched: bool,
    /// Deepest ATX level considered when diffing heading structure, 1-6.
    pub max_heading_level: u8,
    /// Note-id prefixes excluded from rewrite scans, e.g. `templates/`.
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clear_unmatched: false,
            max_heading_level: 6,
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| Error::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a vault root directory using the conventional file name.
    pub fn load_from_vault(root: &Path) -> Result<Self> {
        Self::load(&root.join(CONFIG_FILE_NAME))
    }

    /// Persist configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=6).contains(&self.max_heading_level) {
            return Err(Error::Config(format!(
                "max_heading_level must be 1-6, got {}",
                self.max_heading_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.clear_unmatched);
        assert_eq!(config.max_heading_level, 6);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from_vault(dir.path()).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            clear_unmatched: true,
            max_heading_level: 3,
            ignore: vec!["templates/".to_string()],
        };
        config.save(&path).expect("save");
        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_heading_level = 9\n").expect("write");
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not = [valid\n").expect("write");
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "surprise = true\n").expect("write");
        assert!(Config::load(&path).is_err());
    }
}
