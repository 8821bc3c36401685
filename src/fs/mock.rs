// src/fs/mock.rs

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use super::{EntryMetadata, FileSystem, ListedEntry};

#[derive(Debug, Clone)]
enum MockEntry {
    File { modified: SystemTime },
    Dir { modified: SystemTime, children: BTreeSet<String> },
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    failing: HashSet<PathBuf>,
    dir_reads: Vec<PathBuf>,
}

/// In-memory filesystem with explicit modification times.
///
/// Clones share state, so a test can keep one handle while the scanner owns
/// another.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new(".")
    }
}

impl MockFileSystem {
    /// Create an empty tree whose root directory is `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut state = MockState::default();
        state.entries.insert(
            root.as_ref().to_path_buf(),
            MockEntry::Dir {
                modified: SystemTime::UNIX_EPOCH,
                children: BTreeSet::new(),
            },
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panic while holding the lock only happens inside a failing test.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add (or overwrite) a file, creating parent directories as needed.
    pub fn add_file(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.lock();
        link_into_parent(&mut state, &path);
        state.entries.insert(path, MockEntry::File { modified });
    }

    /// Add an empty directory, creating parents as needed.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.lock();
        ensure_dir(&mut state, &path);
    }

    /// Update the modification time of an existing file or directory.
    pub fn touch(&self, path: impl AsRef<Path>, at: SystemTime) {
        let mut state = self.lock();
        match state.entries.get_mut(path.as_ref()) {
            Some(MockEntry::File { modified }) | Some(MockEntry::Dir { modified, .. }) => {
                *modified = at;
            }
            None => panic!("touch on missing mock entry {:?}", path.as_ref()),
        }
    }

    /// Remove an entry from the tree; the parent listing is updated too.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.entries.remove(path);
        if let (Some(parent), Some(name)) = (path.parent(), file_name(path)) {
            if let Some(MockEntry::Dir { children, .. }) = state.entries.get_mut(parent) {
                children.remove(&name);
            }
        }
    }

    /// Make reading the metadata of `path`, or listing it, fail with
    /// `PermissionDenied`. Listing the parent still reports the entry.
    pub fn fail_on(&self, path: impl AsRef<Path>) {
        self.lock().failing.insert(path.as_ref().to_path_buf());
    }

    /// Directories that have been listed so far, in order.
    pub fn dir_reads(&self) -> Vec<PathBuf> {
        self.lock().dir_reads.clone()
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn link_into_parent(state: &mut MockState, path: &Path) {
    let (Some(parent), Some(name)) = (path.parent(), file_name(path)) else {
        return;
    };
    ensure_dir(state, parent);
    if let Some(MockEntry::Dir { children, .. }) = state.entries.get_mut(parent) {
        children.insert(name);
    }
}

fn ensure_dir(state: &mut MockState, path: &Path) {
    if state.entries.contains_key(path) {
        return;
    }
    state.entries.insert(
        path.to_path_buf(),
        MockEntry::Dir {
            modified: SystemTime::UNIX_EPOCH,
            children: BTreeSet::new(),
        },
    );
    link_into_parent(state, path);
}

fn check_failing(state: &MockState, path: &Path) -> io::Result<()> {
    if state.failing.contains(path) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("mock permission denied: {path:?}"),
        ));
    }
    Ok(())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("mock entry not found: {path:?}"))
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut state = self.lock();
        check_failing(&state, path)?;
        let children = match state.entries.get(path) {
            Some(MockEntry::Dir { children, .. }) => children
                .iter()
                .map(|name| {
                    let child = path.join(name);
                    let is_dir = matches!(state.entries.get(&child), Some(MockEntry::Dir { .. }));
                    ListedEntry {
                        path: child,
                        is_dir,
                    }
                })
                .collect(),
            Some(MockEntry::File { .. }) => {
                return Err(io::Error::other(format!("not a directory: {path:?}")));
            }
            None => return Err(not_found(path)),
        };
        state.dir_reads.push(path.to_path_buf());
        Ok(children)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let state = self.lock();
        check_failing(&state, path)?;
        match state.entries.get(path) {
            Some(MockEntry::File { modified }) => Ok(EntryMetadata {
                is_dir: false,
                modified: *modified,
            }),
            Some(MockEntry::Dir { modified, .. }) => Ok(EntryMetadata {
                is_dir: true,
                modified: *modified,
            }),
            None => Err(not_found(path)),
        }
    }
}
