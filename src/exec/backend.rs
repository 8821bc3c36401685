// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The supervisor talks to a `ProcessBackend` instead of spawning processes
//! itself. Production uses [`RealProcessBackend`]; tests can provide a backend
//! that only records what would have happened.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::errors::{ReloadError, Result};

/// Low-level process operations used by the supervisor.
pub trait ProcessBackend: Send {
    /// Handle to one launched process.
    type Child: Send;

    /// Start `cmd` through a shell.
    fn launch(&mut self, cmd: &str) -> Result<Self::Child>;

    /// Ask the process to exit. Must not force-kill.
    fn terminate(&mut self, child: &mut Self::Child) -> Result<()>;

    /// Block until the process has exited and been reaped.
    fn wait<'a>(
        &'a mut self,
        child: &'a mut Self::Child,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Backend that runs real OS processes via `tokio::process`.
#[derive(Debug, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

impl ProcessBackend for RealProcessBackend {
    type Child = Child;

    fn launch(&mut self, cmd: &str) -> Result<Child> {
        let child = shell_command(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ReloadError::LaunchError {
                cmd: cmd.to_string(),
                source,
            })?;

        info!(pid = ?child.id(), cmd = %cmd, "launched command");
        Ok(child)
    }

    fn terminate(&mut self, child: &mut Child) -> Result<()> {
        let Some(pid) = child.id() else {
            debug!("process already reaped; nothing to signal");
            return Ok(());
        };

        info!(pid, "sending termination signal");
        send_terminate(child, pid)
    }

    fn wait<'a>(
        &'a mut self,
        child: &'a mut Child,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let pid = child.id();
            match child.wait().await {
                Ok(status) => debug!(?pid, %status, "process exited"),
                Err(e) => debug!(?pid, error = %e, "waiting for process failed"),
            }
        })
    }
}

#[cfg(unix)]
fn send_terminate(_child: &mut Child, pid: u32) -> Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let raw = i32::try_from(pid).map_err(|_| ReloadError::SignalError {
        pid,
        reason: "pid out of range".to_string(),
    })?;

    kill(Pid::from_raw(raw), Signal::SIGTERM).map_err(|errno| ReloadError::SignalError {
        pid,
        reason: errno.to_string(),
    })
}

#[cfg(not(unix))]
fn send_terminate(child: &mut Child, pid: u32) -> Result<()> {
    // No graceful signal exists here; the platform kill is the only option.
    child.start_kill().map_err(|e| ReloadError::SignalError {
        pid,
        reason: e.to_string(),
    })
}
