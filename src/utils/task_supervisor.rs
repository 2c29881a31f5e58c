use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

/// Task Supervisor - tracks the long-running feed tasks spawned by the bot
///
/// Tasks are kept in spawn order; several feeds may share a name.
pub struct TaskSupervisor {
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl TaskSupervisor {
    pub fn new() -> Self {
        TaskSupervisor {
            tasks: Vec::new(),
        }
    }

    /// Spawn a new background task and register it for monitoring
    pub fn spawn<F>(&mut self, name: impl Into<String>, future: F) -> &mut Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let handle = tokio::spawn(future);

        info!("Spawned background task: {}", name);
        self.tasks.push((name, handle));
        self
    }

    /// Get count of tasks that have not finished yet
    pub fn active_task_count(&self) -> usize {
        self.tasks.iter().filter(|(_, handle)| !handle.is_finished()).count()
    }

    /// Abort the named tasks immediately and stop tracking them.
    /// Returns the names of the tasks that were aborted.
    pub fn abort(&mut self, names: &[String]) -> Vec<String> {
        let mut aborted = Vec::new();
        self.tasks.retain(|(name, handle)| {
            if names.contains(name) {
                handle.abort();
                aborted.push(name.clone());
                false
            } else {
                true
            }
        });

        for name in &aborted {
            warn!("Task {} aborted", name);
        }
        aborted
    }

    /// Wait until `grace` from now for all tasks together, aborting the ones
    /// still running at the deadline. Returns the names of aborted tasks.
    pub async fn shutdown_all(&mut self, grace: Duration) -> Vec<String> {
        let deadline = Instant::now() + grace;
        let mut aborted = Vec::new();

        for (name, mut handle) in self.tasks.drain(..) {
            match timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => info!("Task {} completed", name),
                Ok(Err(e)) => warn!("Task {} failed: {:?}", name, e),
                Err(_) => {
                    handle.abort();
                    warn!("Task {} did not finish within {:?}, aborted", name, grace);
                    aborted.push(name);
                }
            }
        }

        aborted
    }
}

impl Default for TaskSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
