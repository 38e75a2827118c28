//! Startup configuration: the notes root and the journal directory.
//!
//! Configuration is read once at process start and carried as an
//! immutable value owned by the vault. Operations never consult the
//! environment themselves.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the notes root directory.
pub const ROOT_ENV: &str = "NOTES_PATH";

/// Environment variable naming the journal directory relative to the root.
pub const JOURNAL_ENV: &str = "JOURNAL_REL_PATH";

const DEFAULT_JOURNAL_DIR: &str = "journal";

/// Immutable configuration for a notes directory.
///
/// The root is expanded (`~`), required to exist as a directory, and
/// canonicalized on construction, so every path derived from it is
/// anchored at a stable absolute prefix.
#[derive(Debug, Clone)]
pub struct NotesConfig {
    root: PathBuf,
    journal_dir: String,
}

impl NotesConfig {
    /// Build a configuration from an explicit root and journal directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoot`] if the root does not exist or
    /// is not a directory.
    pub fn new(root: impl AsRef<Path>, journal_dir: impl Into<String>) -> Result<Self, ConfigError> {
        let root = expand_home(root.as_ref());
        if !root.is_dir() {
            return Err(ConfigError::InvalidRoot(root));
        }
        let root = root
            .canonicalize()
            .map_err(|_| ConfigError::InvalidRoot(root.clone()))?;
        Ok(Self {
            root,
            journal_dir: journal_dir.into(),
        })
    }

    /// Build a configuration from the environment (including `.env`),
    /// with explicit overrides taking precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRoot`] if no root is given and
    /// `NOTES_PATH` is unset, or [`ConfigError::InvalidRoot`] if the root
    /// is unusable.
    pub fn resolve(
        root: Option<PathBuf>,
        journal_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let root = match root {
            Some(root) => root,
            None => env::var(ROOT_ENV)
                .map(PathBuf::from)
                .map_err(|_| ConfigError::MissingRoot)?,
        };
        let journal_dir = journal_dir
            .or_else(|| env::var(JOURNAL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_JOURNAL_DIR.to_string());
        Self::new(root, journal_dir)
    }

    /// Absolute, canonicalized notes root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Journal directory relative to the root.
    pub fn journal_dir(&self) -> &str {
        &self.journal_dir
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_canonicalizes_existing_root() {
        let dir = TempDir::new().unwrap();
        let config = NotesConfig::new(dir.path(), "journal").unwrap();
        assert_eq!(config.root(), dir.path().canonicalize().unwrap());
        assert_eq!(config.journal_dir(), "journal");
    }

    #[test]
    fn config_rejects_missing_root() {
        let result = NotesConfig::new("/no/such/notes/root", "journal");
        assert!(matches!(result, Err(ConfigError::InvalidRoot(_))));
    }

    #[test]
    fn config_rejects_file_as_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let result = NotesConfig::new(&file, "journal");
        assert!(matches!(result, Err(ConfigError::InvalidRoot(_))));
    }

    #[test]
    fn resolve_prefers_explicit_overrides() {
        let dir = TempDir::new().unwrap();
        let config =
            NotesConfig::resolve(Some(dir.path().to_path_buf()), Some("diary".to_string()))
                .unwrap();
        assert_eq!(config.journal_dir(), "diary");
    }
}
