//! Day-file lifecycle for the journal directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use orb_core::error::VaultError;
use orb_core::org;

/// Outcome of initializing a day file.
///
/// Re-initialization is an informational skip, not an error: the existing
/// file is left byte-for-byte untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The file was created; carries its name, e.g. `2024-03-01.org`.
    Created(String),
    /// The file already existed and was not modified.
    AlreadyInitialized,
}

/// The journal directory under the notes root.
///
/// Day files are named `<YYYY-MM-DD>.org` and hold a header block plus
/// timestamped entries. Files are created on first write and never
/// deleted here.
#[derive(Debug, Clone)]
pub struct Journal {
    dir: PathBuf,
}

impl Journal {
    pub fn new(root: &Path, journal_dir: &str) -> Self {
        Self {
            dir: root.join(journal_dir),
        }
    }

    /// Absolute path of the day file for `date`.
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(org::day_file_name(date))
    }

    /// Read the day file for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotFound`] if the day was never initialized.
    pub fn read_day(&self, date: NaiveDate) -> Result<String, VaultError> {
        let path = self.day_path(date);
        if !path.exists() {
            return Err(VaultError::NotFound {
                file: org::day_file_name(date),
            });
        }
        fs::read_to_string(&path).map_err(VaultError::from)
    }

    /// Create the day file with its header block unless it already exists.
    ///
    /// Missing parent directories are created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`] if the directory or file cannot be
    /// written.
    pub fn init_day(
        &self,
        date: NaiveDate,
        title: Option<&str>,
    ) -> Result<InitOutcome, VaultError> {
        let path = self.day_path(date);
        if path.exists() {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        fs::create_dir_all(&self.dir).map_err(|source| VaultError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, org::day_header(date, title)).map_err(|source| VaultError::Write {
            path: path.clone(),
            source,
        })?;

        info!(file = %path.display(), "journal day initialized");
        Ok(InitOutcome::Created(org::day_file_name(date)))
    }

    /// Append a timestamped entry to the day file, initializing it first
    /// if it does not exist yet. Returns the timestamp written into the
    /// entry heading.
    ///
    /// Appending is add-only: prior content is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`] if the file cannot be opened or
    /// extended.
    pub fn append_entry(
        &self,
        date: NaiveDate,
        body: &str,
        title: Option<&str>,
    ) -> Result<String, VaultError> {
        let path = self.day_path(date);
        if !path.exists() {
            self.init_day(date, None)?;
        }

        let timestamp = org::entry_timestamp(Local::now());
        let heading = org::entry_heading(&timestamp, title);

        let mut file =
            OpenOptions::new()
                .append(true)
                .open(&path)
                .map_err(|source| VaultError::Write {
                    path: path.clone(),
                    source,
                })?;
        write!(file, "\n{heading}\n{body}\n").map_err(|source| VaultError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(file = %path.display(), %timestamp, "journal entry appended");
        Ok(timestamp)
    }

    /// Replace every occurrence of `old` with `new` in the day file.
    ///
    /// This is a literal whole-file substitution: all matches are
    /// rewritten, not just the first. That is the contract, not an
    /// accident; callers anchor on text unique enough for their purposes.
    /// The rewrite goes through a temp file in the journal directory and
    /// is renamed over the target, so a crash cannot leave a half-written
    /// day file behind.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotFound`] if the day file does not exist and
    /// [`VaultError::TextNotFound`] if `old` does not occur verbatim; in
    /// the latter case the file is left byte-identical.
    pub fn edit_entry(&self, date: NaiveDate, old: &str, new: &str) -> Result<(), VaultError> {
        let path = self.day_path(date);
        if !path.exists() {
            return Err(VaultError::NotFound {
                file: org::day_file_name(date),
            });
        }

        let content = fs::read_to_string(&path)?;
        if !content.contains(old) {
            return Err(VaultError::TextNotFound);
        }
        let updated = content.replace(old, new);

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|source| VaultError::Write {
            path: path.clone(),
            source,
        })?;
        tmp.write_all(updated.as_bytes())
            .map_err(|source| VaultError::Write {
                path: path.clone(),
                source,
            })?;
        tmp.persist(&path).map_err(|e| VaultError::Write {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(file = %path.display(), "journal entry edited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn journal(dir: &TempDir) -> Journal {
        Journal::new(dir.path(), "journal")
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn init_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        let outcome = journal.init_day(day(), Some("Planning")).unwrap();
        assert_eq!(outcome, InitOutcome::Created("2024-03-01.org".to_string()));

        let content = journal.read_day(day()).unwrap();
        assert!(content.contains("#+TITLE: Planning"));
        assert!(content.contains("#+DATE: 2024-03-01"));
        assert!(content.contains("#+FILETAGS: :journal:automated:"));
    }

    #[test]
    fn init_twice_is_an_idempotent_skip() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.init_day(day(), Some("Planning")).unwrap();
        let before = journal.read_day(day()).unwrap();

        let outcome = journal.init_day(day(), Some("Clobber?")).unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyInitialized);
        assert_eq!(journal.read_day(day()).unwrap(), before);
    }

    #[test]
    fn read_day_of_uninitialized_date_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = journal(&dir).read_day(day());
        assert!(matches!(result, Err(VaultError::NotFound { .. })));
    }

    #[test]
    fn append_initializes_absent_day_first() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.append_entry(day(), "Discussed roadmap", None).unwrap();

        let content = journal.read_day(day()).unwrap();
        assert!(content.contains("#+TITLE: 2024-03-01"));
        assert!(content.contains("Discussed roadmap"));
    }

    #[test]
    fn append_writes_a_parseable_timestamp_before_the_body() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        let ts = journal
            .append_entry(day(), "Discussed roadmap", Some("Standup"))
            .unwrap();
        NaiveDateTime::parse_from_str(&ts, org::TIMESTAMP_FORMAT)
            .expect("timestamp should round-trip through its own format");

        let content = journal.read_day(day()).unwrap();
        let heading_at = content.find(&format!("* {ts} Standup :AUTOMATED:")).unwrap();
        let body_at = content.find("Discussed roadmap").unwrap();
        assert!(heading_at < body_at);
    }

    #[test]
    fn append_is_add_only() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.init_day(day(), Some("Planning")).unwrap();
        let before = journal.read_day(day()).unwrap();

        journal.append_entry(day(), "first", None).unwrap();
        journal.append_entry(day(), "second", None).unwrap();

        let content = journal.read_day(day()).unwrap();
        assert!(content.starts_with(&before));
        assert!(content.contains("first"));
        assert!(content.contains("second"));
    }

    #[test]
    fn edit_replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.append_entry(day(), "roadmap, then more roadmap", None).unwrap();
        journal.edit_entry(day(), "roadmap", "budget").unwrap();

        let content = journal.read_day(day()).unwrap();
        assert!(!content.contains("roadmap"));
        assert_eq!(content.matches("budget").count(), 2);
    }

    #[test]
    fn edit_of_absent_day_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = journal(&dir).edit_entry(day(), "a", "b");
        assert!(matches!(result, Err(VaultError::NotFound { .. })));
    }

    #[test]
    fn edit_with_absent_anchor_leaves_file_byte_identical() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.append_entry(day(), "Discussed roadmap", None).unwrap();
        let before = journal.read_day(day()).unwrap();

        let result = journal.edit_entry(day(), "no such text", "whatever");
        assert!(matches!(result, Err(VaultError::TextNotFound)));
        assert_eq!(journal.read_day(day()).unwrap(), before);
    }

    #[test]
    fn edit_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);

        journal.append_entry(day(), "roadmap", None).unwrap();
        journal.edit_entry(day(), "roadmap", "budget").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path().join("journal"))
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2024-03-01.org"]);
    }
}
