// src/engine/driver.rs

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::SystemTime;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::exec::{ProcessBackend, Supervisor, SupervisorState};
use crate::fs::FileSystem;
use crate::watch::{scan, ScanOutcome, ScanState};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Unchanged,
    /// A change was detected and the command was (re)started.
    Restarted { trigger: PathBuf },
    /// The first tick found files but `initial_run` is off.
    Suppressed { trigger: PathBuf },
}

/// Owns all loop state: the scan timestamp and the supervised process.
///
/// Everything runs on the caller's task; a tick (scan plus any restart) always
/// finishes before the next one starts.
pub struct Driver<F: FileSystem, B: ProcessBackend> {
    config: WatchConfig,
    fs: F,
    state: ScanState,
    supervisor: Supervisor<B>,
}

impl<F: FileSystem, B: ProcessBackend> fmt::Debug for Driver<F, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("root", &self.config.root())
            .field("state", &self.state)
            .field("supervisor", &self.supervisor)
            .finish_non_exhaustive()
    }
}

impl<F: FileSystem, B: ProcessBackend> Driver<F, B> {
    pub fn new(config: WatchConfig, fs: F, backend: B) -> Self {
        Self {
            config,
            fs,
            state: ScanState::new(),
            supervisor: Supervisor::new(backend),
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.state
    }

    pub fn supervisor(&self) -> &Supervisor<B> {
        &self.supervisor
    }

    /// Run one scan-and-maybe-restart step.
    ///
    /// `last_check` is updated after the scan completes, whatever the outcome,
    /// so a file written during the scan is picked up on the next tick.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let first_scan = self.state.last_check().is_none();

        let outcome = scan(
            &self.fs,
            self.config.root(),
            self.config.pattern(),
            self.config.ignore(),
            &self.state,
        )?;
        self.state.record(SystemTime::now());

        let trigger = match outcome {
            ScanOutcome::Unchanged => {
                trace!("no changes");
                return Ok(TickOutcome::Unchanged);
            }
            ScanOutcome::Changed { path } => path,
        };

        if first_scan && !self.config.initial_run() {
            debug!(trigger = %trigger.display(), "skipping initial run");
            return Ok(TickOutcome::Suppressed { trigger });
        }

        let name = trigger
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| trigger.display().to_string());
        println!("{name} changed. Reloading..");

        self.supervisor.restart(self.config.cmd()).await?;
        Ok(TickOutcome::Restarted { trigger })
    }

    /// Tick at the configured interval until `shutdown` resolves or an error
    /// occurs, then stop the current child.
    ///
    /// Shutdown is observed both between ticks and while a tick is running. A
    /// tick interrupted mid-restart (for example while waiting on a child that
    /// ignores SIGTERM) is abandoned; the unreaped child stays owned by the
    /// supervisor and is signalled again when it is stopped. Ticks that
    /// overrun the interval delay the next one; missed ticks are skipped. On
    /// error the child is still stopped and the original error is returned.
    pub async fn run_until<S>(mut self, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        info!(
            root = %self.config.root().display(),
            glob = %self.config.pattern().as_str(),
            poll_ms = self.config.poll_interval().as_millis() as u64,
            "watching for changes"
        );

        let mut ticker = interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break Ok(());
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested during a tick");
                    break Ok(());
                }
                ticked = self.tick() => {
                    if let Err(e) = ticked {
                        break Err(e);
                    }
                }
            }
        };

        if self.supervisor.state() == SupervisorState::Running {
            info!("stopping supervised command");
        }
        let stopped = self.supervisor.shutdown().await;

        match (result, stopped) {
            (Err(e), Err(stop_err)) => {
                warn!(error = %stop_err, "failed to stop supervised command");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), stopped) => stopped,
        }
    }
}
