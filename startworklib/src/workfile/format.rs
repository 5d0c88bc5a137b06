//! Canonical go.work rendering and writing.
//!
//! The layout matches the Go toolchain's own writer: statements separated by
//! a blank line, a single `use` on one line, several `use` directives grouped
//! in a tab-indented block.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::quote::auto_quote;
use super::{Use, WorkFile};
use crate::error::StartworkError;
use crate::precondition::WORK_FILE;
use crate::Result;

/// Permission bits of the generated file.
#[cfg(unix)]
const WORK_FILE_MODE: u32 = 0o644;

fn use_tokens(entry: &Use) -> String {
    let mut line = auto_quote(&entry.path);
    if !entry.module_path.is_empty() {
        line.push(' ');
        line.push_str(&auto_quote(&entry.module_path));
    }
    line
}

impl WorkFile {
    /// Render the document in canonical go.work syntax.
    pub fn format(&self) -> String {
        let mut stmts: Vec<String> = Vec::new();

        if let Some(version) = &self.go {
            stmts.push(format!("go {version}"));
        }

        match self.uses.as_slice() {
            [] => {}
            [single] => stmts.push(format!("use {}", use_tokens(single))),
            many => {
                let mut block = String::from("use (");
                for entry in many {
                    block.push_str("\n\t");
                    block.push_str(&use_tokens(entry));
                }
                block.push_str("\n)");
                stmts.push(block);
            }
        }

        if stmts.is_empty() {
            return String::new();
        }

        let mut out = stmts.join("\n\n");
        out.push('\n');
        out
    }

    /// Write the rendered document to `go.work` inside `root`.
    ///
    /// The file is created fresh with one write; an existing file is never
    /// overwritten. Returns the path written.
    pub fn write_to(&self, root: impl AsRef<Path>) -> Result<PathBuf> {
        let path = root.as_ref().join(WORK_FILE);
        let data = self.format();

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(WORK_FILE_MODE);
        }

        let mut file = options.open(&path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StartworkError::WorkFileExists(path.clone()),
            _ => StartworkError::WriteFile {
                path: path.clone(),
                source: e,
            },
        })?;

        file.write_all(data.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| StartworkError::WriteFile {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), modules = self.uses.len(), "wrote workspace file");
        Ok(path)
    }
}
