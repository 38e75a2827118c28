//! Filename search across the notes tree.

use std::path::Path;

use walkdir::WalkDir;

use orb_core::org;

/// Case-insensitive substring search over note filenames.
///
/// Walks the whole tree under `root`, considers only `.org` files, and
/// matches `query` against each filename with the org-roam ID prefix
/// stripped (extension included), so `"meeting"` finds
/// `20240101120000-meeting-notes.org`.
///
/// Returns root-relative paths joined with `/` on every OS. Ordering
/// follows directory traversal and is unstable across filesystems;
/// callers must not rely on it. No matches is an empty list, not an
/// error; unreadable entries are skipped.
pub fn search(root: &Path, query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(org::NOTE_EXT) {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !org::strip_roam_id(name).to_lowercase().contains(&needle) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            matches.push(rel_string(rel));
        }
    }
    matches
}

/// Root-relative path rendered with `/` separators regardless of OS.
fn rel_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
