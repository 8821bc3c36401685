use std::fs;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Write `contents` to `path`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Sleep long enough that a write lands strictly after the last scan.
///
/// Filesystem timestamps come from a coarse kernel clock that can trail
/// `SystemTime::now()` by a few milliseconds.
#[allow(dead_code)]
pub fn settle() {
    std::thread::sleep(Duration::from_millis(50));
}
