//! Module discovery: find every directory holding a `go.mod`.
//!
//! The walk is best-effort. Entries that cannot be read are recorded as
//! [`SkippedPath`] diagnostics and the walk carries on with the rest of the
//! tree; a single bad subtree never aborts the scan.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::StartworkError;
use crate::Result;

/// File whose presence marks a directory as a Go module.
pub const MODULE_MARKER: &str = "go.mod";

/// A path the walk could not visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    /// Offending path, when the walker could tell
    pub path: Option<PathBuf>,
    /// Human readable cause
    pub reason: String,
}

/// Result of scanning a tree for modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleScan {
    /// Module directories relative to the scan root, in walk order
    pub module_dirs: Vec<PathBuf>,
    /// Entries skipped because of traversal errors
    pub skipped: Vec<SkippedPath>,
}

impl ModuleScan {
    /// Number of modules found.
    pub fn len(&self) -> usize {
        self.module_dirs.len()
    }

    /// True when no module was found.
    pub fn is_empty(&self) -> bool {
        self.module_dirs.is_empty()
    }
}

/// Check whether a walk entry is a module marker.
///
/// Only regular files count. Directories and symlinks named `go.mod` are
/// ignored.
fn is_module_marker(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name() == MODULE_MARKER
}

/// Express `dir` relative to `root`, using `.` for the root itself.
fn relative_dir(dir: &Path, root: &Path) -> PathBuf {
    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => dir.to_path_buf(),
    }
}

/// Discover module directories under `root`.
///
/// Walks the whole tree depth first in directory-listing order (no sorting)
/// without following symlinks, and records the parent directory of every
/// regular file named `go.mod`. Module directories whose relative path is not
/// valid UTF-8 cannot be written to go.work and are reported as skipped.
pub fn scan_modules(root: impl AsRef<Path>) -> Result<ModuleScan> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(StartworkError::PathNotFound(root.to_path_buf()));
    }

    let mut scan = ModuleScan::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(path = ?err.path(), error = %err, "skipping unreadable path");
                scan.skipped.push(SkippedPath {
                    path: err.path().map(Path::to_path_buf),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        trace!(path = %entry.path().display(), "visiting");

        if !is_module_marker(&entry) {
            continue;
        }

        let Some(parent) = entry.path().parent() else {
            continue;
        };

        let dir = relative_dir(parent, root);
        if dir.to_str().is_none() {
            warn!(dir = %dir.display(), "skipping module whose path is not valid UTF-8");
            scan.skipped.push(SkippedPath {
                path: Some(parent.to_path_buf()),
                reason: "module directory name is not valid UTF-8".to_string(),
            });
            continue;
        }

        debug!(dir = %dir.display(), "found module");
        scan.module_dirs.push(dir);
    }

    Ok(scan)
}
