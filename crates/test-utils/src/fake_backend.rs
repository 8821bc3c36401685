use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use pollreload::errors::{ReloadError, Result};
use pollreload::exec::ProcessBackend;

/// Something the fake backend was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Launched { id: u32, cmd: String },
    Terminated { id: u32 },
    Reaped { id: u32 },
}

#[derive(Debug, Default)]
struct Shared {
    events: Vec<ProcessEvent>,
    live: Vec<u32>,
    max_live: usize,
    next_id: u32,
    fail_launch: bool,
}

/// Handle to a fake process.
#[derive(Debug)]
pub struct FakeChild {
    id: u32,
}

impl FakeChild {
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// A fake backend that:
/// - records every launch / terminate / reap
/// - tracks how many children are alive at once
///
/// Clones share state, so a test can inspect the log while the driver owns
/// the backend.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessBackend {
    shared: Arc<Mutex<Shared>>,
}

impl FakeProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProcessEvent> {
        self.shared.lock().unwrap().events.clone()
    }

    pub fn launch_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProcessEvent::Launched { .. }))
            .count()
    }

    /// Largest number of children that were ever alive at the same time.
    pub fn max_live(&self) -> usize {
        self.shared.lock().unwrap().max_live
    }

    pub fn live(&self) -> Vec<u32> {
        self.shared.lock().unwrap().live.clone()
    }

    /// Make every subsequent launch fail as if the shell were missing.
    pub fn fail_launches(&self) {
        self.shared.lock().unwrap().fail_launch = true;
    }
}

impl ProcessBackend for FakeProcessBackend {
    type Child = FakeChild;

    fn launch(&mut self, cmd: &str) -> Result<FakeChild> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_launch {
            return Err(ReloadError::LaunchError {
                cmd: cmd.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake: no shell"),
            });
        }

        shared.next_id += 1;
        let id = shared.next_id;
        shared.live.push(id);
        shared.max_live = shared.max_live.max(shared.live.len());
        shared.events.push(ProcessEvent::Launched {
            id,
            cmd: cmd.to_string(),
        });
        Ok(FakeChild { id })
    }

    fn terminate(&mut self, child: &mut FakeChild) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        shared.events.push(ProcessEvent::Terminated { id: child.id });
        Ok(())
    }

    fn wait<'a>(
        &'a mut self,
        child: &'a mut FakeChild,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        let shared = Arc::clone(&self.shared);
        let id = child.id;
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut guard = shared.lock().unwrap();
            guard.live.retain(|&live| live != id);
            guard.events.push(ProcessEvent::Reaped { id });
        })
    }
}
