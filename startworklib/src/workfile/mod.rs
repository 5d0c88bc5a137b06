//! In-memory model of a go.work file.
//!
//! A [`WorkFile`] holds the `go` directive and the ordered list of `use`
//! directives. It is built once, rendered with [`WorkFile::format`], and can be
//! read back with [`WorkFile::parse`].
//!
//! ## Example
//!
//! ```rust
//! use startworklib::WorkFile;
//!
//! let mut work = WorkFile::new();
//! work.add_go_stmt("1.18").unwrap();
//! work.add_directory("./a", "").unwrap();
//! work.add_directory("./b/c", "").unwrap();
//!
//! assert_eq!(work.format(), "go 1.18\n\nuse (\n\t./a\n\t./b/c\n)\n");
//! ```

pub mod format;
pub mod parse;
pub mod quote;

use std::path::{Component, Path};

use crate::error::StartworkError;
use crate::version::is_valid_go_version;
use crate::Result;

/// A single `use` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use {
    /// Directory of the module, as written in the file (`./a`, `.`)
    pub path: String,
    /// Module path the directory provides. Empty when unknown.
    pub module_path: String,
}

/// A go.work document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkFile {
    /// Go language version from the `go` directive
    pub go: Option<String>,
    /// `use` directives in file order
    pub uses: Vec<Use>,
}

impl WorkFile {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `go` directive.
    pub fn add_go_stmt(&mut self, version: &str) -> Result<()> {
        if !is_valid_go_version(version) {
            return Err(StartworkError::InvalidGoVersion(version.to_string()));
        }
        self.go = Some(version.to_string());
        Ok(())
    }

    /// Append a `use` directive for `disk_path`.
    ///
    /// A directory may appear only once per document.
    pub fn add_directory(&mut self, disk_path: &str, module_path: &str) -> Result<()> {
        if self.uses.iter().any(|u| u.path == disk_path) {
            return Err(StartworkError::DuplicateUse(disk_path.to_string()));
        }
        self.uses.push(Use {
            path: disk_path.to_string(),
            module_path: module_path.to_string(),
        });
        Ok(())
    }

    /// Directories named by `use` directives, in order.
    pub fn directories(&self) -> Vec<&str> {
        self.uses.iter().map(|u| u.path.as_str()).collect()
    }
}

/// Spell a directory the way go.work files name it.
///
/// Separators become `/`, the root is `.`, and other relative paths get a
/// `./` prefix. Absolute paths are kept as they are. Names that are not
/// valid UTF-8 are rejected rather than rewritten.
pub fn workspace_path(dir: &Path) -> Result<String> {
    let non_utf8 = || StartworkError::NonUtf8Path(dir.to_path_buf());

    if dir.is_absolute() {
        return dir.to_str().map(|s| s.replace('\\', "/")).ok_or_else(non_utf8);
    }

    let parts = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_str().ok_or_else(non_utf8))
        .collect::<Result<Vec<&str>>>()?;

    Ok(match parts.first() {
        None => ".".to_string(),
        Some(&"..") => parts.join("/"),
        Some(_) => format!("./{}", parts.join("/")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_add_go_stmt_validates() {
        let mut work = WorkFile::new();
        assert!(work.add_go_stmt("1.18").is_ok());
        assert_eq!(work.go.as_deref(), Some("1.18"));

        let err = work.add_go_stmt("go1.18").unwrap_err();
        assert!(matches!(err, StartworkError::InvalidGoVersion(v) if v == "go1.18"));
        assert_eq!(work.go.as_deref(), Some("1.18"));
    }

    #[test]
    fn test_add_directory_preserves_order() {
        let mut work = WorkFile::new();
        work.add_directory("./z", "").unwrap();
        work.add_directory("./a", "").unwrap();
        work.add_directory(".", "").unwrap();

        assert_eq!(work.directories(), vec!["./z", "./a", "."]);
        assert!(work.uses.iter().all(|u| u.module_path.is_empty()));
    }

    #[test]
    fn test_add_directory_rejects_duplicates() {
        let mut work = WorkFile::new();
        work.add_directory("./a", "").unwrap();

        let err = work.add_directory("./a", "example.com/a").unwrap_err();
        assert!(matches!(err, StartworkError::DuplicateUse(p) if p == "./a"));
        assert_eq!(work.uses.len(), 1);
    }

    #[test]
    fn test_workspace_path() {
        let spell = |p: &Path| workspace_path(p).unwrap();
        assert_eq!(spell(Path::new(".")), ".");
        assert_eq!(spell(Path::new("")), ".");
        assert_eq!(spell(Path::new("a")), "./a");
        assert_eq!(spell(Path::new("./a")), "./a");
        assert_eq!(spell(&PathBuf::from("b").join("c")), "./b/c");
        assert_eq!(spell(Path::new("../sibling")), "../sibling");
    }

    #[cfg(unix)]
    #[test]
    fn test_workspace_path_absolute() {
        assert_eq!(workspace_path(Path::new("/src/mod")).unwrap(), "/src/mod");
    }

    #[cfg(unix)]
    #[test]
    fn test_workspace_path_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(OsStr::from_bytes(b"caf\xe9"));
        match workspace_path(dir) {
            Err(StartworkError::NonUtf8Path(path)) => assert_eq!(path, dir),
            other => panic!("Expected NonUtf8Path, got {other:?}"),
        }

        let nested = Path::new("ok").join(dir);
        assert!(workspace_path(&nested).is_err());
    }
}
