// tests/scanner_real_fs.rs
mod common;
use crate::common::{init_tracing, settle, write_file};

use std::path::Path;
use std::time::SystemTime;

use pollreload::errors::ReloadError;
use pollreload::fs::RealFileSystem;
use pollreload::watch::{scan, IgnoreSet, NamePattern, ScanOutcome, ScanState};

fn scan_dir(root: &Path, glob: &str, ignore: &str, state: &ScanState) -> ScanOutcome {
    scan(
        &RealFileSystem,
        root,
        &NamePattern::new(glob).unwrap(),
        &IgnoreSet::parse(ignore),
        state,
    )
    .unwrap()
}

#[test]
fn detects_write_after_last_check() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("cmd/app/main.go"), "package main");
    write_file(&dir.path().join("README.md"), "# readme");

    let mut state = ScanState::new();
    assert!(scan_dir(dir.path(), "*.go", ".git", &state).is_changed());
    state.record(SystemTime::now());

    assert_eq!(scan_dir(dir.path(), "*.go", ".git", &state), ScanOutcome::Unchanged);
    assert_eq!(scan_dir(dir.path(), "*.go", ".git", &state), ScanOutcome::Unchanged);

    settle();
    write_file(&dir.path().join("cmd/app/main.go"), "package main // edited");
    assert_eq!(
        scan_dir(dir.path(), "*.go", ".git", &state),
        ScanOutcome::Changed { path: dir.path().join("cmd/app/main.go") }
    );
}

#[test]
fn non_matching_files_are_ignored() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("main.go"), "package main");

    let mut state = ScanState::new();
    state.record(SystemTime::now());
    settle();
    write_file(&dir.path().join("notes.txt"), "todo");

    assert_eq!(scan_dir(dir.path(), "*.go", "", &state), ScanOutcome::Unchanged);
    assert!(scan_dir(dir.path(), "*.txt", "", &state).is_changed());
}

#[test]
fn ignored_directories_at_any_depth() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("vendor/x.go"), "package x");
    write_file(&dir.path().join("internal/vendor/y.go"), "package y");
    write_file(&dir.path().join(".git/hooks/pre-commit.go"), "package hooks");

    let state = ScanState::new();
    assert_eq!(
        scan_dir(dir.path(), "*.go", ".git,vendor", &state),
        ScanOutcome::Unchanged
    );
}

#[test]
fn missing_root_is_reported_not_treated_as_change() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("gone");

    let err = scan(
        &RealFileSystem,
        &gone,
        &NamePattern::new("*.go").unwrap(),
        &IgnoreSet::default(),
        &ScanState::new(),
    )
    .unwrap_err();

    match err {
        ReloadError::ScanError { path, .. } => assert_eq!(path, gone),
        other => panic!("expected ScanError, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() {
    init_tracing();
    let outside = tempfile::tempdir().unwrap();
    write_file(&outside.path().join("lib.go"), "package lib");

    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

    assert_eq!(
        scan_dir(dir.path(), "*.go", "", &ScanState::new()),
        ScanOutcome::Unchanged
    );
}
