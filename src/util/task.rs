use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Spawned background work keyed by purpose. Re-spawning under the same
/// key supersedes (aborts) the previous task; classification fetches use a
/// per-submit key so overlapping submits both run to settlement, and
/// everything is aborted together on shutdown.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn<F>(&mut self, key: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.insert(key.to_string(), tokio::spawn(future)) {
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}
