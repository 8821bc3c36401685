// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReloadError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("error scanning {path:?}: {source}")]
    ScanError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch `{cmd}`: {source}")]
    LaunchError {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to signal process {pid}: {reason}")]
    SignalError { pid: u32, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReloadError {
    /// Wrap an IO error raised while scanning `path`.
    pub fn scan(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReloadError::ScanError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReloadError>;
