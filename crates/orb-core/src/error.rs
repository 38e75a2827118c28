//! Error types for orb.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Startup configuration failures.
///
/// These are fatal: the process refuses to start without a usable
/// notes root.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NOTES_PATH is not defined in the environment or .env")]
    MissingRoot,

    #[error("notes root '{0}' does not exist or is not a directory")]
    InvalidRoot(PathBuf),
}

/// Per-operation failures of the notes vault.
///
/// None of these escape the operation boundary: the MCP and CLI layers
/// catch them and render a descriptive text result, so a bad request
/// cannot take the process down.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The resolved path landed outside the notes root.
    #[error("access denied (path out of bounds): {path}")]
    AccessDenied { path: String },

    /// The targeted journal file does not exist.
    #[error("{file} does not exist")]
    NotFound { file: String },

    /// The literal text to replace does not occur in the file.
    #[error("original text not found")]
    TextNotFound,

    /// Creating, appending to, or rewriting a file failed.
    #[error("write failed for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = ConfigError::InvalidRoot(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));

        let err = VaultError::AccessDenied {
            path: "../secrets".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("access denied"));
        assert!(msg.contains("../secrets"));

        let err = VaultError::NotFound {
            file: "2024-03-01.org".to_string(),
        };
        assert!(err.to_string().contains("2024-03-01.org"));
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = VaultError::from(io_err);
        assert!(matches!(err, VaultError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
