// src/watch/scanner.rs

//! Polling change detection.
//!
//! A scan walks the tree once, depth-first in lexical order, and stops at the
//! first matching file whose modification time is strictly newer than the
//! previous scan.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::errors::{ReloadError, Result};
use crate::fs::{FileSystem, ListedEntry};
use crate::watch::patterns::{IgnoreSet, NamePattern};

/// Result of a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Unchanged,
    /// `path` is the first changed file found in traversal order.
    Changed { path: PathBuf },
}

impl ScanOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, ScanOutcome::Changed { .. })
    }
}

/// Time of the last completed scan.
///
/// `None` until the first scan completes, in which case every matching file
/// counts as changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    last_check: Option<SystemTime>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_check(&self) -> Option<SystemTime> {
        self.last_check
    }

    /// Record that a scan completed at `now`.
    ///
    /// Never moves backwards, even if the wall clock does.
    pub fn record(&mut self, now: SystemTime) {
        self.last_check = Some(match self.last_check {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// Whether a file modified at `modified` is newer than the last scan.
    pub fn is_newer(&self, modified: SystemTime) -> bool {
        match self.last_check {
            Some(last) => modified > last,
            None => true,
        }
    }
}

/// Scan `root` for a matching file modified after `state.last_check()`.
///
/// Directories named in `ignore` are pruned and ignored files are skipped.
/// Entry kinds come from the directory listing, so only non-ignored files
/// whose name matches `pattern` are stat'ed. Any error listing a visited
/// directory or reading a matching file's metadata aborts the scan.
pub fn scan(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &NamePattern,
    ignore: &IgnoreSet,
    state: &ScanState,
) -> Result<ScanOutcome> {
    match walk(fs, root, pattern, ignore, state)? {
        ControlFlow::Break(path) => {
            debug!(path = %path.display(), "scan found changed file");
            Ok(ScanOutcome::Changed { path })
        }
        ControlFlow::Continue(()) => Ok(ScanOutcome::Unchanged),
    }
}

fn walk(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &NamePattern,
    ignore: &IgnoreSet,
    state: &ScanState,
) -> Result<ControlFlow<PathBuf>> {
    // Pending entries, popped in lexical order. Children of a directory are
    // pushed in reverse so the smallest name is visited next.
    let mut stack = sorted_children(fs, root)?;
    stack.reverse();

    while let Some(entry) = stack.pop() {
        let Some(name) = entry.path.file_name() else {
            continue;
        };
        let ignored = ignore.contains(name);

        if entry.is_dir {
            if ignored {
                trace!(dir = %entry.path.display(), "pruning ignored directory");
                continue;
            }
            let mut children = sorted_children(fs, &entry.path)?;
            children.reverse();
            stack.extend(children);
            continue;
        }

        // Only matching files are stat'ed.
        if ignored || !pattern.matches(name) {
            continue;
        }

        let meta = fs
            .metadata(&entry.path)
            .map_err(|e| ReloadError::scan(&entry.path, e))?;
        if state.is_newer(meta.modified) {
            return Ok(ControlFlow::Break(entry.path));
        }
    }

    Ok(ControlFlow::Continue(()))
}

fn sorted_children(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<ListedEntry>> {
    let mut children = fs.read_dir(dir).map_err(|e| ReloadError::scan(dir, e))?;
    children.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(children)
}
