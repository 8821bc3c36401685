#![allow(dead_code)]

use std::path::PathBuf;

use pollreload::config::{RawWatchConfig, WatchConfig};

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    raw: RawWatchConfig,
}

impl WatchConfigBuilder {
    /// Start from the CLI defaults with the given command.
    pub fn new(cmd: &str) -> Self {
        Self {
            raw: RawWatchConfig {
                cmd: Some(cmd.to_string()),
                ..RawWatchConfig::default()
            },
        }
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.dir = Some(dir.into());
        self
    }

    pub fn glob(mut self, glob: &str) -> Self {
        self.raw.glob = glob.to_string();
        self
    }

    pub fn ignore(mut self, list: &str) -> Self {
        self.raw.ignore = list.to_string();
        self
    }

    pub fn poll_rate_ms(mut self, ms: u64) -> Self {
        self.raw.poll_rate_ms = ms;
        self
    }

    pub fn skip_initial(mut self) -> Self {
        self.raw.initial_run = false;
        self
    }

    pub fn raw(self) -> RawWatchConfig {
        self.raw
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}
