// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{RawWatchConfig, WatchConfig};
use crate::engine::Driver;
use crate::errors::Result;
use crate::exec::RealProcessBackend;
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution and validation
/// - the driver loop (scanner + supervisor)
/// - Ctrl-C handling (graceful first, forced second)
pub async fn run(args: CliArgs) -> Result<()> {
    let config = WatchConfig::try_from(RawWatchConfig::from(&args))?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let driver = Driver::new(config, RealFileSystem, RealProcessBackend::new());

    // First Ctrl-C → graceful shutdown, second → immediate exit.
    let interrupted = spawn_interrupt_handler();
    let shutdown = async move {
        if interrupted.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    driver.run_until(shutdown).await?;
    info!("pollreload exiting");
    Ok(())
}

/// Exit code after a second Ctrl-C (128 + SIGINT).
pub const FORCED_EXIT_CODE: i32 = 130;

/// Listen for Ctrl-C in a background task.
///
/// The returned receiver resolves on the first interrupt. A second interrupt
/// exits the process with [`FORCED_EXIT_CODE`] without waiting for the
/// supervised command, which may be ignoring SIGTERM. If the listener cannot
/// be installed the sender is dropped.
fn spawn_interrupt_handler() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = tx.send(());

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("second interrupt; exiting without waiting for the command");
            std::process::exit(FORCED_EXIT_CODE);
        }
    });
    rx
}

/// Simple dry-run output: print the resolved configuration.
fn print_dry_run(config: &WatchConfig) {
    println!("pollreload dry-run");
    println!("  dir: {}", config.root().display());
    println!("  cmd: {}", config.cmd());
    println!("  glob: {}", config.pattern().as_str());
    let ignore: Vec<&str> = config.ignore().iter().collect();
    println!("  ignore: {:?}", ignore);
    println!("  poll-rate: {}ms", config.poll_interval().as_millis());
    println!("  initial run: {}", config.initial_run());

    debug!("dry-run complete (no execution)");
}
