// src/fs/mod.rs

//! Filesystem access used by the scanner.
//!
//! The scanner only ever needs two things: the entries of a directory, each
//! with the kind reported by the listing, and the (non-followed) metadata of a
//! file it actually cares about. Keeping that behind a trait lets tests drive
//! the scanner with [`mock::MockFileSystem`] and exact timestamps.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// One entry of a directory listing.
///
/// `is_dir` comes from the listing itself and does not follow symlinks, so a
/// link to a directory is reported as a non-directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListedEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// What the scanner needs to know about a single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub is_dir: bool,
    pub modified: SystemTime,
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Return the entries of a directory with full paths, in no particular
    /// order. Entries are not stat'ed individually.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<ListedEntry>>;

    /// Metadata for `path` without following a trailing symlink.
    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // `DirEntry::file_type` never follows symlinks.
            let is_dir = entry.file_type()?.is_dir();
            entries.push(ListedEntry {
                path: entry.path(),
                is_dir,
            });
        }
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let meta = fs::symlink_metadata(path)?;
        Ok(EntryMetadata {
            is_dir: meta.is_dir(),
            modified: meta.modified()?,
        })
    }
}
