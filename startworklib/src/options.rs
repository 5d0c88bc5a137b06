//! Input options for building a workspace file.

use std::path::PathBuf;

use crate::version::ReleaseTags;

/// Options controlling a startwork run.
#[derive(Debug, Clone)]
pub struct StartworkOptions {
    /// Directory to scan and to write go.work into
    pub root: PathBuf,
    /// Release tags used to pick the `go` directive version
    pub release_tags: ReleaseTags,
}

impl Default for StartworkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            release_tags: ReleaseTags::default(),
        }
    }
}

impl StartworkOptions {
    /// Create new default options (current directory, built-in release tags).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the workspace root.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Builder: set the release tags.
    pub fn release_tags(mut self, tags: ReleaseTags) -> Self {
        self.release_tags = tags;
        self
    }
}
