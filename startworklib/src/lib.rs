//! # startworklib
//!
//! Build a `go.work` file that ties together every Go module found under a
//! directory.
//!
//! ## Overview
//!
//! A run is a straight pipeline:
//!
//! - **Precondition**: refuse to touch an existing `go.work`
//! - **Scan**: walk the tree and collect every directory holding a `go.mod`
//! - **Build**: a [`WorkFile`] with a `go` directive and one `use` per module
//! - **Write**: render canonical go.work syntax and create the file
//!
//! Each stage is a plain function over explicit inputs, so the pieces can be
//! used on their own. The Go version comes from an injected [`ReleaseTags`]
//! list rather than from global state.
//!
//! ## Example
//!
//! ```rust
//! use startworklib::{start_work, ReleaseTags, StartworkOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("a")).unwrap();
//! fs::write(dir.path().join("a/go.mod"), "module example.com/a\n").unwrap();
//!
//! let options = StartworkOptions::new()
//!     .root(dir.path())
//!     .release_tags(ReleaseTags::new(["go1.17", "go1.18"]));
//! let result = start_work(&options).unwrap();
//!
//! let written = fs::read_to_string(result.path).unwrap();
//! assert_eq!(written, "go 1.18\n\nuse ./a\n");
//! ```

pub mod error;
pub mod options;
pub mod precondition;
pub mod scan;
pub mod start;
pub mod version;
pub mod workfile;

pub use error::StartworkError;
pub use options::StartworkOptions;
pub use precondition::{ensure_no_work_file, WORK_FILE};
pub use scan::{scan_modules, ModuleScan, SkippedPath, MODULE_MARKER};
pub use start::{build_work_file, start_work, StartworkResult};
pub use version::{is_valid_go_version, ReleaseTags};
pub use workfile::{workspace_path, Use, WorkFile};

/// Result type for startworklib operations
pub type Result<T> = std::result::Result<T, StartworkError>;
