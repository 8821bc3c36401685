// src/engine/mod.rs

//! Driver loop for pollreload.
//!
//! The [`driver::Driver`] ties together the scanner and the supervisor: on
//! every tick it scans the watched tree, records the scan time and, if a
//! change was found, restarts the supervised command.

pub mod driver;

pub use driver::{Driver, TickOutcome};
