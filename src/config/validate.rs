// src/config/validate.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::model::{RawWatchConfig, WatchConfig};
use crate::errors::{ReloadError, Result};
use crate::watch::{IgnoreSet, NamePattern};

impl TryFrom<RawWatchConfig> for WatchConfig {
    type Error = ReloadError;

    fn try_from(raw: RawWatchConfig) -> std::result::Result<Self, Self::Error> {
        let cmd = validate_cmd(raw.cmd)?;
        let root = resolve_root(raw.dir.as_deref())?;
        let pattern = NamePattern::new(&raw.glob)?;
        let poll_interval = validate_poll_rate(raw.poll_rate_ms)?;
        let ignore = IgnoreSet::parse(&raw.ignore);

        Ok(WatchConfig::new_unchecked(
            root,
            pattern,
            ignore,
            cmd,
            poll_interval,
            raw.initial_run,
        ))
    }
}

fn validate_cmd(cmd: Option<String>) -> Result<String> {
    match cmd {
        Some(cmd) if !cmd.trim().is_empty() => Ok(cmd),
        _ => Err(ReloadError::ConfigError(
            "--cmd must be supplied".to_string(),
        )),
    }
}

/// Make the watch root absolute. The directory does not have to exist yet;
/// a missing root surfaces as a scan error on the first tick.
fn resolve_root(dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match dir {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    let abs = std::path::absolute(dir).map_err(|e| {
        ReloadError::ConfigError(format!("error resolving --dir {dir:?}: {e}"))
    })?;

    Ok(normalize(&abs))
}

/// Drop `.` components so `/work/.` logs as `/work`.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

fn validate_poll_rate(ms: u64) -> Result<Duration> {
    if ms == 0 {
        return Err(ReloadError::ConfigError(
            "--poll-rate must be >= 1 millisecond (got 0)".to_string(),
        ));
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_cmd() -> RawWatchConfig {
        RawWatchConfig {
            cmd: Some("go run .".to_string()),
            ..RawWatchConfig::default()
        }
    }

    #[test]
    fn defaults_resolve_to_current_dir() {
        let cfg = WatchConfig::try_from(raw_with_cmd()).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(cfg.root(), cwd.as_path());
        assert!(cfg.root().is_absolute());
        assert_eq!(cfg.pattern().as_str(), "*.go");
        assert_eq!(cfg.ignore().iter().collect::<Vec<_>>(), vec![".git"]);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
        assert!(cfg.initial_run());
    }

    #[test]
    fn relative_dir_becomes_absolute() {
        let raw = RawWatchConfig {
            dir: Some(PathBuf::from("src")),
            ..raw_with_cmd()
        };
        let cfg = WatchConfig::try_from(raw).unwrap();
        assert!(cfg.root().is_absolute());
        assert!(cfg.root().ends_with("src"));
    }

    #[test]
    fn missing_or_blank_cmd_is_rejected() {
        for cmd in [None, Some(String::new()), Some("   ".to_string())] {
            let raw = RawWatchConfig {
                cmd,
                ..RawWatchConfig::default()
            };
            match WatchConfig::try_from(raw) {
                Err(ReloadError::ConfigError(msg)) => assert!(msg.contains("--cmd")),
                other => panic!("expected ConfigError, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_glob_is_rejected_up_front() {
        let raw = RawWatchConfig {
            glob: "[a-".to_string(),
            ..raw_with_cmd()
        };
        let err = WatchConfig::try_from(raw).unwrap_err();
        assert!(matches!(err, ReloadError::InvalidGlob { .. }));
        assert!(err.to_string().contains("[a-"));
    }

    #[test]
    fn zero_poll_rate_is_rejected() {
        let raw = RawWatchConfig {
            poll_rate_ms: 0,
            ..raw_with_cmd()
        };
        assert!(matches!(
            WatchConfig::try_from(raw),
            Err(ReloadError::ConfigError(_))
        ));
    }
}
