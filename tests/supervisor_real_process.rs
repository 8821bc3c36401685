// tests/supervisor_real_process.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, write_file};

use std::fs;
use std::time::Duration;

use nix::sys::signal::kill;
use nix::unistd::Pid;

use pollreload::engine::{Driver, TickOutcome};
use pollreload::errors::Result;
use pollreload::exec::{RealProcessBackend, Supervisor, SupervisorState};
use pollreload::fs::RealFileSystem;
use pollreload_test_utils::builders::WatchConfigBuilder;
use pollreload_test_utils::with_timeout;

fn is_alive(pid: u32) -> bool {
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

#[tokio::test]
async fn restart_reaps_the_previous_process() -> Result<()> {
    init_tracing();
    let mut sup = Supervisor::new(RealProcessBackend::new());

    sup.restart("exec sleep 30").await?;
    let first = sup.current().and_then(|c| c.id()).expect("first pid");
    assert!(is_alive(first));

    with_timeout(sup.restart("exec sleep 30")).await?;
    let second = sup.current().and_then(|c| c.id()).expect("second pid");

    assert_ne!(first, second);
    assert!(!is_alive(first), "old process must be gone after restart");
    assert!(is_alive(second));

    with_timeout(sup.shutdown()).await?;
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert!(!is_alive(second));
    Ok(())
}

#[tokio::test]
async fn terminating_an_already_exited_child_is_fine() -> Result<()> {
    init_tracing();
    let mut sup = Supervisor::new(RealProcessBackend::new());

    sup.restart("true").await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    with_timeout(sup.restart("true")).await?;
    with_timeout(sup.shutdown()).await?;
    Ok(())
}

/// Each run appends `start` and, on SIGTERM, `stop`. With one child at a time
/// the log strictly alternates.
#[tokio::test]
async fn runs_never_overlap() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let watched = dir.path().join("src");
    let log = dir.path().join("runs.log");
    write_file(&watched.join("a.go"), "package a");

    let cmd = format!(
        "echo start >> '{log}'; trap 'echo stop >> \"{log}\"; exit 0' TERM; \
         while :; do sleep 0.05; done",
        log = log.display()
    );
    let config = WatchConfigBuilder::new(&cmd)
        .dir(&watched)
        .poll_rate_ms(50)
        .build();
    let mut driver = Driver::new(config, RealFileSystem, RealProcessBackend::new());

    assert!(matches!(driver.tick().await?, TickOutcome::Restarted { .. }));
    for i in 0..2 {
        // Let the child install its TERM trap before the next change.
        tokio::time::sleep(Duration::from_millis(200)).await;
        write_file(&watched.join("a.go"), &format!("package a // {i}"));
        let outcome = with_timeout(driver.tick()).await?;
        assert!(matches!(outcome, TickOutcome::Restarted { .. }));
    }
    assert_eq!(with_timeout(driver.tick()).await?, TickOutcome::Unchanged);

    // Give the last child time to write its `start` line before reading.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(driver.supervisor().launches(), 3);

    let contents = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["start", "stop", "start", "stop", "start"]);

    driver.run_until(async {}).await?;
    let contents = fs::read_to_string(&log).unwrap();
    assert_eq!(contents.lines().last(), Some("stop"));
    Ok(())
}
