// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pollreload`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pollreload",
    version,
    about = "Poll a directory tree and restart a command when matching files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to recursively watch for changes.
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Shell command to run (and restart) when changes are detected.
    ///
    /// Required. Validated when the configuration is built so that a missing
    /// command is reported like every other configuration error.
    #[arg(long, value_name = "COMMAND")]
    pub cmd: Option<String>,

    /// Glob to match file names against (`*`, `?`, `[...]`).
    #[arg(long, value_name = "PATTERN", default_value = "*.go")]
    pub glob: String,

    /// Comma-separated list of file and directory names to ignore.
    #[arg(long, value_name = "NAMES", default_value = ".git")]
    pub ignore: String,

    /// Milliseconds to wait between checks for changes.
    #[arg(long = "poll-rate", value_name = "MS", default_value_t = 100)]
    pub poll_rate: u64,

    /// Do not launch the command on the first tick; wait for a real change.
    #[arg(long)]
    pub skip_initial: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `POLLRELOAD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but don't watch or run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
