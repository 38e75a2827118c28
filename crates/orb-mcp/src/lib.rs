//! # orb-mcp
//!
//! MCP (Model Context Protocol) server for the notes vault.
//!
//! Exposes the vault operations as MCP tools:
//! - `search_notes`: filename search, org-roam ID prefixes ignored
//! - `read_note`: read a note by root-relative path
//! - `initialize_journal_day`: create a day file with header metadata
//! - `add_journal_entry`: append a timestamped entry
//! - `edit_journal_entry`: literal replace-all edit of a day file
//!
//! and one resource:
//! - `notes://today`: content of today's journal day file
//!
//! Results are plain strings; failures are rendered as prefixed text
//! messages rather than protocol faults, so one bad request never takes
//! the server down.

pub mod tools;

pub use tools::NotesService;
