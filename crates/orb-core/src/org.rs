//! Org-mode conventions for machine-managed note files.
//!
//! Day files carry a header block:
//! ```org
//! #+TITLE: Planning
//! #+DATE: 2024-03-01
//! #+FILETAGS: :journal:automated:
//! ```
//! followed by timestamped entries:
//! ```org
//! * <2024-03-01 Fri 14:30> Standup :AUTOMATED:
//! Discussed roadmap
//! ```
//! Everything else in a note is treated as opaque text.

use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;

/// File extension of note files.
pub const NOTE_EXT: &str = "org";

/// Active-timestamp pattern written into entry headings,
/// e.g. `<2024-03-01 Fri 14:30>`. Minute precision, local clock.
pub const TIMESTAMP_FORMAT: &str = "<%Y-%m-%d %a %H:%M>";

/// ISO date format used for day-file names and header fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// org-roam prepends a 14-digit creation timestamp and a hyphen to the
/// filenames it generates (`20240101120000-meeting-notes.org`).
static ROAM_ID_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{14}-").unwrap());

/// Strip the org-roam ID prefix from a filename, if present, so matching
/// can run against the human-chosen part of the name.
pub fn strip_roam_id(file_name: &str) -> &str {
    match ROAM_ID_PREFIX.find(file_name) {
        Some(m) => &file_name[m.end()..],
        None => file_name,
    }
}

/// Filename of the day file for `date`, e.g. `2024-03-01.org`.
pub fn day_file_name(date: NaiveDate) -> String {
    format!("{}.{}", date.format(DATE_FORMAT), NOTE_EXT)
}

/// Header block written when a day file is first created. The title
/// defaults to the ISO date when the caller supplies none.
pub fn day_header(date: NaiveDate, title: Option<&str>) -> String {
    let iso = date.format(DATE_FORMAT).to_string();
    let title = title.filter(|t| !t.trim().is_empty()).unwrap_or(&iso);
    format!("#+TITLE: {title}\n#+DATE: {iso}\n#+FILETAGS: :journal:automated:\n\n")
}

/// Heading line for an appended entry. The `:AUTOMATED:` tag marks
/// entries written by this tool.
pub fn entry_heading(timestamp: &str, title: Option<&str>) -> String {
    match title.filter(|t| !t.trim().is_empty()) {
        Some(title) => format!("* {timestamp} {title} :AUTOMATED:"),
        None => format!("* {timestamp} :AUTOMATED:"),
    }
}

/// Capture-time active timestamp for an entry heading.
pub fn entry_timestamp(now: DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}
