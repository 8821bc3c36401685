// src/watch/patterns.rs

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{ReloadError, Result};

/// Compiled shell-style pattern matched against a single file *name*.
///
/// Supports `*`, `?` and `[...]` character classes. Patterns never span path
/// separators: `*` does not match `/`, and since only names are matched a
/// `**` behaves exactly like `*`.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    matcher: GlobMatcher,
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamePattern")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl NamePattern {
    /// Compile `pattern`. A malformed pattern (e.g. an unclosed `[`) is a
    /// configuration error.
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(cfg!(unix))
            .build()
            .map_err(|source| ReloadError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern as given by the user.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, name: &OsStr) -> bool {
        self.matcher.is_match(name)
    }
}

/// Literal file/directory names excluded from traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    /// Parse a comma-separated list such as `".git,vendor, node_modules"`.
    ///
    /// Items are trimmed and empty items are dropped.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        match name.to_str() {
            Some(s) => self.names.contains(s),
            None => self.names.contains(name.to_string_lossy().as_ref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
