// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessBackend` trait and the production
//!   `RealProcessBackend` built on `tokio::process`.
//! - [`supervisor`] owns the single child process and implements the
//!   terminate, wait, relaunch sequence on top of a backend.

pub mod backend;
pub mod supervisor;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use supervisor::{Supervisor, SupervisorState};
