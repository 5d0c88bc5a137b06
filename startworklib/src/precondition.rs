//! Refuse to run over an existing go.work file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StartworkError;
use crate::Result;

/// Name of the generated workspace file.
pub const WORK_FILE: &str = "go.work";

/// Ensure `root` does not already contain a go.work file.
///
/// A lookup that fails with "not found" or "permission denied" counts as
/// absent. Any other lookup failure is returned as an I/O error.
pub fn ensure_no_work_file(root: impl AsRef<Path>) -> Result<()> {
    let path = root.as_ref().join(WORK_FILE);

    match fs::symlink_metadata(&path) {
        Ok(_) => Err(StartworkError::WorkFileExists(path)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => Ok(()),
        Err(e) => Err(StartworkError::Io(e)),
    }
}
