//! # orb-core
//!
//! Configuration, error taxonomy, and org-mode file conventions shared
//! across the orb crates:
//! - [`NotesConfig`] — immutable startup configuration (root + journal dir)
//! - Error hierarchy ([`ConfigError`], [`VaultError`])
//! - [`org`] — the org-mode surface this tool reads and writes

pub mod config;
pub mod error;
pub mod org;

pub use config::NotesConfig;
pub use error::{ConfigError, Result, VaultError};
