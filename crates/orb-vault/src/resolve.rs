//! Path resolution against the notes root.

use std::path::{Component, Path, PathBuf};

use orb_core::error::VaultError;

/// Resolves caller-supplied paths under a fixed root and rejects anything
/// that lands outside it.
///
/// Containment is checked segment-wise via [`Path::starts_with`], never as
/// a string prefix, so a sibling directory sharing a prefix with the root
/// (`/notes` vs `/notes-private`) can never pass.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// `root` must already be absolute and canonical; the configuration
    /// layer guarantees this.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` under the root.
    ///
    /// Absolute inputs are re-rooted rather than honored, `.` and `..`
    /// segments are resolved, and symlinked targets are canonicalized when
    /// they exist so a link cannot smuggle a path out of the tree. An
    /// empty input resolves to the root itself.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AccessDenied`] when the resolved path is not
    /// a descendant of the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, VaultError> {
        let denied = || {
            tracing::debug!(path = relative, "path escapes notes root");
            VaultError::AccessDenied {
                path: relative.to_string(),
            }
        };

        let mut resolved = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir => {
                    if resolved == self.root || !resolved.pop() {
                        return Err(denied());
                    }
                }
                Component::Normal(part) => resolved.push(part),
            }
        }

        // The lexical walk above cannot escape, but a symlink inside the
        // tree still can; canonicalize when the target exists.
        if let Ok(canonical) = resolved.canonicalize() {
            if !canonical.starts_with(&self.root) {
                return Err(denied());
            }
            return Ok(canonical);
        }
        Ok(resolved)
    }
}
