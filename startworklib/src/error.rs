//! Error types for startworklib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a go.work file
#[derive(Error, Debug)]
pub enum StartworkError {
    /// The output file is already present in the workspace root
    #[error("go.work already exists in current directory.\nstartwork doesn't yet support editing already existing go.work files")]
    WorkFileExists(PathBuf),

    /// The last known release tag is not a usable Go version
    #[error("go: internal error: unrecognized default version {0:?}")]
    UnrecognizedVersion(String),

    /// A go directive was given a malformed version
    #[error("invalid go version '{0}': must match format 1.23")]
    InvalidGoVersion(String),

    /// A use directive for this directory is already present
    #[error("directory '{0}' is already used in the workspace")]
    DuplicateUse(String),

    /// Failed to write the output file
    #[error("failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed go.work contents
    #[error("go.work:{line}: {message}")]
    Parse { line: usize, message: String },

    /// Root directory does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// A directory name that go.work cannot spell
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
