// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::CliArgs;
use crate::watch::{IgnoreSet, NamePattern};

/// Default file name pattern.
pub const DEFAULT_GLOB: &str = "*.go";

/// Default comma-separated ignore list.
pub const DEFAULT_IGNORE: &str = ".git";

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_RATE_MS: u64 = 100;

/// Unvalidated settings, as produced by the CLI layer.
///
/// Use `WatchConfig::try_from` to validate and resolve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWatchConfig {
    /// Root to watch; `None` means the current directory.
    pub dir: Option<PathBuf>,
    pub cmd: Option<String>,
    pub glob: String,
    /// Comma-separated ignore list.
    pub ignore: String,
    pub poll_rate_ms: u64,
    pub initial_run: bool,
}

impl Default for RawWatchConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cmd: None,
            glob: DEFAULT_GLOB.to_string(),
            ignore: DEFAULT_IGNORE.to_string(),
            poll_rate_ms: DEFAULT_POLL_RATE_MS,
            initial_run: true,
        }
    }
}

impl From<&CliArgs> for RawWatchConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            dir: args.dir.clone(),
            cmd: args.cmd.clone(),
            glob: args.glob.clone(),
            ignore: args.ignore.clone(),
            poll_rate_ms: args.poll_rate,
            initial_run: !args.skip_initial,
        }
    }
}

/// Validated, immutable watch configuration.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    root: PathBuf,
    pattern: NamePattern,
    ignore: IgnoreSet,
    cmd: String,
    poll_interval: Duration,
    initial_run: bool,
}

impl WatchConfig {
    /// Construct a `WatchConfig` from already-validated parts.
    ///
    /// Callers are expected to go through `TryFrom<RawWatchConfig>`.
    pub(crate) fn new_unchecked(
        root: PathBuf,
        pattern: NamePattern,
        ignore: IgnoreSet,
        cmd: String,
        poll_interval: Duration,
        initial_run: bool,
    ) -> Self {
        Self {
            root,
            pattern,
            ignore,
            cmd,
            poll_interval,
            initial_run,
        }
    }

    /// Absolute root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Shell command to run on change.
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Whether the first tick's change launches the command.
    pub fn initial_run(&self) -> bool {
        self.initial_run
    }
}
