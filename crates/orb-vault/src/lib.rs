//! # orb-vault
//!
//! The sandboxed notes repository. The directory tree under the
//! configured root is the single source of truth: every operation
//! re-reads or re-resolves from disk, no state is cached between calls,
//! and no path outside the root is ever touched.

pub mod journal;
pub mod resolve;
pub mod search;

use std::fs;

use chrono::NaiveDate;

use orb_core::config::NotesConfig;
use orb_core::error::VaultError;

pub use journal::{InitOutcome, Journal};
pub use resolve::Sandbox;

/// The operation set over a notes directory: daily-note read, filename
/// search, sandboxed read-by-path, and the journal day-file lifecycle.
///
/// Operations are synchronous, independent, and uncoordinated; if a
/// transport dispatches two mutations of the same day file concurrently,
/// the last write wins.
#[derive(Debug, Clone)]
pub struct Vault {
    config: NotesConfig,
    sandbox: Sandbox,
    journal: Journal,
}

impl Vault {
    pub fn new(config: NotesConfig) -> Self {
        let sandbox = Sandbox::new(config.root().to_path_buf());
        let journal = Journal::new(config.root(), config.journal_dir());
        Self {
            config,
            sandbox,
            journal,
        }
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    /// Content of the journal day file for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotFound`] if no file exists for that day.
    pub fn daily_note(&self, date: NaiveDate) -> Result<String, VaultError> {
        self.journal.read_day(date)
    }

    /// Case-insensitive filename search across the whole tree; org-roam
    /// ID prefixes are ignored. Ordering is traversal order and unstable.
    pub fn search(&self, query: &str) -> Vec<String> {
        search::search(self.config.root(), query)
    }

    /// Read an arbitrary note by root-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AccessDenied`] if the path escapes the root,
    /// or the underlying I/O error if the file cannot be read.
    pub fn read_note(&self, relative: &str) -> Result<String, VaultError> {
        let path = self.sandbox.resolve(relative)?;
        fs::read_to_string(&path).map_err(VaultError::from)
    }

    /// Create the day file for `date` unless it already exists.
    pub fn init_day(
        &self,
        date: NaiveDate,
        title: Option<&str>,
    ) -> Result<InitOutcome, VaultError> {
        self.journal.init_day(date, title)
    }

    /// Append a timestamped entry to the day file for `date`, creating it
    /// first if needed. Returns the timestamp written into the heading.
    pub fn append_entry(
        &self,
        date: NaiveDate,
        body: &str,
        title: Option<&str>,
    ) -> Result<String, VaultError> {
        self.journal.append_entry(date, body, title)
    }

    /// Replace every occurrence of `old` with `new` in the day file for
    /// `date`.
    pub fn edit_entry(&self, date: NaiveDate, old: &str, new: &str) -> Result<(), VaultError> {
        self.journal.edit_entry(date, old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault(dir: &TempDir) -> Vault {
        Vault::new(NotesConfig::new(dir.path(), "journal").unwrap())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn read_note_returns_content_inside_the_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("idea.org"), "a note").unwrap();

        assert_eq!(vault(&dir).read_note("idea.org").unwrap(), "a note");
    }

    #[test]
    fn read_note_never_leaks_content_outside_the_root() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.org"), "secret").unwrap();

        let dir = TempDir::new().unwrap();
        let vault = vault(&dir);

        let escape = format!("../{}/secret.org", outside.path().file_name().unwrap().to_str().unwrap());
        let result = vault.read_note(&escape);
        assert!(matches!(result, Err(VaultError::AccessDenied { .. })));
    }

    #[test]
    fn daily_note_reflects_journal_writes() {
        let dir = TempDir::new().unwrap();
        let vault = vault(&dir);

        assert!(matches!(
            vault.daily_note(day()),
            Err(VaultError::NotFound { .. })
        ));

        vault.init_day(day(), Some("Planning")).unwrap();
        vault.append_entry(day(), "Discussed roadmap", None).unwrap();
        vault.edit_entry(day(), "roadmap", "budget").unwrap();

        let content = vault.daily_note(day()).unwrap();
        assert!(content.contains("#+TITLE: Planning"));
        assert!(content.contains("Discussed budget"));
        assert!(!content.contains("roadmap"));
    }

    #[test]
    fn search_sees_journal_files_like_any_other_note() {
        let dir = TempDir::new().unwrap();
        let vault = vault(&dir);
        vault.init_day(day(), None).unwrap();

        let results = vault.search("2024-03");
        assert_eq!(results, vec!["journal/2024-03-01.org"]);
    }
}
