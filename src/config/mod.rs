// src/config/mod.rs

//! Watch configuration.
//!
//! - [`model`] holds the raw CLI-shaped settings and the validated
//!   `WatchConfig`.
//! - [`validate`] turns one into the other: it resolves the root directory,
//!   compiles the glob and parses the ignore list.

pub mod model;
pub mod validate;

pub use model::{RawWatchConfig, WatchConfig};
