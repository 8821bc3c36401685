// src/watch/mod.rs

//! File change detection.
//!
//! This module is responsible for:
//! - Compiling the file name pattern and parsing the ignore list.
//! - Walking the watched tree once per tick and deciding whether anything
//!   relevant changed since the previous scan.
//!
//! It does **not** know about processes; it only answers "did something
//! change, and which file was first".

pub mod patterns;
pub mod scanner;

pub use patterns::{IgnoreSet, NamePattern};
pub use scanner::{scan, ScanOutcome, ScanState};
