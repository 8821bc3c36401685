// src/exec/supervisor.rs

//! Ownership of the single supervised child process.

use std::fmt;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::backend::ProcessBackend;

/// Observable supervisor state.
///
/// `Terminating` only exists for the duration of [`Supervisor::restart`] and
/// [`Supervisor::shutdown`], which hold `&mut self`, so it is never observed
/// from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Running,
}

/// Owns at most one live child process.
pub struct Supervisor<B: ProcessBackend> {
    backend: B,
    current: Option<B::Child>,
    launches: u64,
}

impl<B: ProcessBackend> fmt::Debug for Supervisor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("state", &self.state())
            .field("launches", &self.launches)
            .finish_non_exhaustive()
    }
}

impl<B: ProcessBackend> Supervisor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            launches: 0,
        }
    }

    pub fn state(&self) -> SupervisorState {
        if self.current.is_some() {
            SupervisorState::Running
        } else {
            SupervisorState::Idle
        }
    }

    /// Number of launches performed so far.
    pub fn launches(&self) -> u64 {
        self.launches
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The live child, if any.
    pub fn current(&self) -> Option<&B::Child> {
        self.current.as_ref()
    }

    /// Terminate the current child (if any), wait for it to exit, then launch
    /// `cmd` as the new child.
    ///
    /// The old child is always reaped before the new one starts. Errors from
    /// signalling or launching are returned to the caller; the old child's
    /// exit status is discarded.
    pub async fn restart(&mut self, cmd: &str) -> Result<()> {
        self.stop_current().await?;

        let child = self.backend.launch(cmd)?;
        self.current = Some(child);
        self.launches += 1;
        info!(launches = self.launches, "command (re)started");
        Ok(())
    }

    /// Terminate and reap the current child, leaving the supervisor idle.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stop_current().await
    }

    /// The handle stays in `current` until the child is reaped, so a caller
    /// that drops this future mid-wait can still stop the child later.
    async fn stop_current(&mut self) -> Result<()> {
        let Some(child) = self.current.as_mut() else {
            debug!("no process running; nothing to terminate");
            return Ok(());
        };

        self.backend.terminate(child)?;
        self.backend.wait(child).await;
        self.current = None;
        Ok(())
    }
}
