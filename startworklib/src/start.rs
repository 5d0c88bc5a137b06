//! High-level entry point: scan a tree and write its go.work file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::options::StartworkOptions;
use crate::precondition::ensure_no_work_file;
use crate::scan::{scan_modules, SkippedPath};
use crate::workfile::{workspace_path, WorkFile};
use crate::Result;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct StartworkResult {
    /// Path of the written go.work file
    pub path: PathBuf,
    /// Document that was written
    pub work_file: WorkFile,
    /// Paths the scan could not visit
    pub skipped: Vec<SkippedPath>,
}

/// Build a go.work document from a version and scanned module directories.
///
/// Directories keep their scan order and get no module path.
pub fn build_work_file<P: AsRef<Path>>(version: &str, module_dirs: &[P]) -> Result<WorkFile> {
    let mut work = WorkFile::new();
    work.add_go_stmt(version)?;
    for dir in module_dirs {
        work.add_directory(&workspace_path(dir.as_ref())?, "")?;
    }
    Ok(work)
}

/// Create a go.work file listing every module under `options.root`.
///
/// This is the whole pipeline:
/// 1. Refuse to continue if go.work already exists
/// 2. Walk the tree for `go.mod` files
/// 3. Resolve the `go` directive version from the release tags
/// 4. Build the document and write it
///
/// # Example
///
/// ```rust,ignore
/// use startworklib::{start_work, StartworkOptions};
///
/// let result = start_work(&StartworkOptions::new().root("."))?;
/// println!("wrote {}", result.path.display());
/// ```
pub fn start_work(options: &StartworkOptions) -> Result<StartworkResult> {
    ensure_no_work_file(&options.root)?;

    let scan = scan_modules(&options.root)?;
    if !scan.skipped.is_empty() {
        warn!(count = scan.skipped.len(), "some paths could not be scanned");
    }

    let version = options.release_tags.latest_go_version()?;
    debug!(%version, modules = scan.len(), "building workspace");

    let work_file = build_work_file(&version, &scan.module_dirs)?;
    let path = work_file.write_to(&options.root)?;

    Ok(StartworkResult {
        path,
        work_file,
        skipped: scan.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StartworkError;
    use crate::precondition::WORK_FILE;
    use crate::version::ReleaseTags;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn create_module(root: &Path, dir: &str) {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("go.mod"), format!("module example.com/{dir}\n")).unwrap();
    }

    fn options_for(root: &Path) -> StartworkOptions {
        StartworkOptions::new()
            .root(root)
            .release_tags(ReleaseTags::new(["go1.17", "go1.18"]))
    }

    #[test]
    fn test_build_work_file_keeps_order() {
        let dirs = [PathBuf::from("b/c"), PathBuf::from("."), PathBuf::from("a")];
        let work = build_work_file("1.18", &dirs).unwrap();

        assert_eq!(work.go.as_deref(), Some("1.18"));
        assert_eq!(work.directories(), vec!["./b/c", ".", "./a"]);
    }

    #[test]
    fn test_build_work_file_rejects_bad_version() {
        let result = build_work_file::<PathBuf>("go1.18", &[]);
        assert!(matches!(result, Err(StartworkError::InvalidGoVersion(_))));
    }

    #[test]
    fn test_start_work_writes_all_modules() {
        let temp = tempdir().unwrap();
        create_module(temp.path(), "a");
        create_module(temp.path(), "b/c");
        fs::create_dir_all(temp.path().join("docs")).unwrap();

        let result = start_work(&options_for(temp.path())).unwrap();

        assert_eq!(result.path, temp.path().join(WORK_FILE));
        let written = fs::read_to_string(&result.path).unwrap();
        assert_eq!(written, result.work_file.format());

        let parsed = WorkFile::parse(&written).unwrap();
        assert_eq!(parsed.go.as_deref(), Some("1.18"));
        let dirs: HashSet<&str> = parsed.directories().into_iter().collect();
        assert_eq!(dirs, HashSet::from(["./a", "./b/c"]));
        assert!(written.starts_with("go 1.18\n\nuse (\n"));
    }

    #[test]
    fn test_start_work_without_modules() {
        let temp = tempdir().unwrap();

        let result = start_work(&options_for(temp.path())).unwrap();

        assert_eq!(fs::read_to_string(result.path).unwrap(), "go 1.18\n");
    }

    #[test]
    fn test_start_work_root_module() {
        let temp = tempdir().unwrap();
        create_module(temp.path(), "");

        let result = start_work(&options_for(temp.path())).unwrap();

        assert_eq!(
            fs::read_to_string(result.path).unwrap(),
            "go 1.18\n\nuse .\n"
        );
    }

    #[test]
    fn test_start_work_leaves_existing_file_untouched() {
        let temp = tempdir().unwrap();
        create_module(temp.path(), "a");
        fs::write(temp.path().join(WORK_FILE), "original\n").unwrap();

        let result = start_work(&options_for(temp.path()));

        assert!(matches!(result, Err(StartworkError::WorkFileExists(_))));
        assert_eq!(
            fs::read_to_string(temp.path().join(WORK_FILE)).unwrap(),
            "original\n"
        );
    }

    #[test]
    fn test_second_run_aborts() {
        let temp = tempdir().unwrap();
        create_module(temp.path(), "a");

        start_work(&options_for(temp.path())).unwrap();
        let first = fs::read_to_string(temp.path().join(WORK_FILE)).unwrap();

        create_module(temp.path(), "late");
        assert!(start_work(&options_for(temp.path())).is_err());
        assert_eq!(
            fs::read_to_string(temp.path().join(WORK_FILE)).unwrap(),
            first
        );
    }

    #[test]
    fn test_bad_release_tags_write_nothing() {
        let temp = tempdir().unwrap();
        create_module(temp.path(), "a");
        let options = options_for(temp.path()).release_tags(ReleaseTags::new(["devel"]));

        let result = start_work(&options);

        assert!(matches!(result, Err(StartworkError::UnrecognizedVersion(t)) if t == "devel"));
        assert!(!temp.path().join(WORK_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_build_work_file_rejects_non_utf8_dir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dirs = [PathBuf::from(OsStr::from_bytes(b"caf\xe9"))];
        let result = build_work_file("1.18", &dirs);
        assert!(matches!(result, Err(StartworkError::NonUtf8Path(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_module_dir_is_skipped_not_mangled() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempdir().unwrap();
        create_module(temp.path(), "plain");
        let odd = temp.path().join(OsStr::from_bytes(b"caf\xe9"));
        // Some filesystems refuse non-UTF-8 names outright.
        if fs::create_dir(&odd).is_err() {
            return;
        }
        fs::write(odd.join("go.mod"), "module example.com/cafe\n").unwrap();

        let result = start_work(&options_for(temp.path())).unwrap();

        let written = fs::read_to_string(&result.path).unwrap();
        assert_eq!(written, "go 1.18\n\nuse ./plain\n");
        assert!(!written.contains('\u{fffd}'));
        assert!(result
            .skipped
            .iter()
            .any(|s| s.path.as_deref() == Some(odd.as_path())));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        create_module(temp.path(), "ok");
        create_module(temp.path(), "locked/inner");
        let locked = temp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root ignores directory permissions.
        let readable = fs::read_dir(&locked).is_ok();
        let result = start_work(&options_for(temp.path()));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let result = result.unwrap();
        let dirs = result.work_file.directories();
        assert!(dirs.contains(&"./ok"));
        if !readable {
            assert!(!dirs.contains(&"./locked/inner"));
            assert!(!result.skipped.is_empty());
        }
    }
}
