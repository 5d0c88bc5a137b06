//! Go language version resolution.
//!
//! The `go` directive of a new workspace names the newest language version
//! the tool knows about. That knowledge comes from a list of release tags
//! (`go1.1`, `go1.2`, ...) which is passed in rather than read from global
//! state, so resolution can be exercised with arbitrary lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::StartworkError;
use crate::Result;

/// Pattern a Go language version must match (`1.18`, `1.21.3`, `1.22rc1`).
pub static GO_VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([1-9][0-9]*)\.(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))?([a-z]+[0-9]+)?$")
        .expect("go version pattern is valid")
});

/// Prefix carried by every release tag.
pub const RELEASE_TAG_PREFIX: &str = "go";

/// Newest Go 1.x minor release this build targets.
pub const LATEST_GO_MINOR: u32 = 23;

/// Check whether `version` is a well-formed Go language version.
pub fn is_valid_go_version(version: &str) -> bool {
    GO_VERSION_RE.is_match(version)
}

/// Ordered list of supported release tags, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTags {
    tags: Vec<String>,
}

impl Default for ReleaseTags {
    /// `go1.1` through `go1.LATEST_GO_MINOR`.
    fn default() -> Self {
        Self {
            tags: (1..=LATEST_GO_MINOR)
                .map(|minor| format!("{RELEASE_TAG_PREFIX}1.{minor}"))
                .collect(),
        }
    }
}

impl ReleaseTags {
    /// Create a tag list from explicit values, oldest first.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// All tags, oldest first.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Resolve the newest language version from the tag list.
    ///
    /// Takes the last tag, strips the `go` prefix and validates the rest.
    /// Anything else is an internal inconsistency rather than a user error:
    /// writing it into a go.work file would produce a broken workspace.
    pub fn latest_go_version(&self) -> Result<String> {
        let last = self
            .tags
            .last()
            .ok_or_else(|| StartworkError::UnrecognizedVersion(String::new()))?;

        match last.strip_prefix(RELEASE_TAG_PREFIX) {
            Some(version) if is_valid_go_version(version) => Ok(version.to_string()),
            _ => Err(StartworkError::UnrecognizedVersion(last.clone())),
        }
    }
}
