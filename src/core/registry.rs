//! Active-task registry: mutex-guarded tracking of in-flight work.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::core::task::Task;
use crate::util::serde::{JobId, TaskId};

/// Mapping from task id to in-flight task, guarded by a single lock covering
/// insert, remove, and scan.
///
/// Only atomic compound operations are exposed; the map itself never leaks,
/// so there is no check-then-act window for callers to misuse. The lock is
/// held for map operations only, never across a queue push.
pub struct ActiveRegistry<P> {
    tasks: Mutex<HashMap<TaskId, Task<P>>>,
}

impl<P> ActiveRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Record a task as active, stamping `dispatched_at = now`.
    ///
    /// Called by the facade immediately after a successful dequeue.
    pub fn track(&self, mut task: Task<P>, now: Instant) {
        task.dispatched_at = Some(now);
        self.tasks.lock().insert(task.id, task);
    }

    /// Atomically remove and return the task if present.
    ///
    /// Normal completion and reclamation both go through here, so at most one
    /// caller ever wins the release for a given id.
    pub fn release(&self, id: &TaskId) -> Option<Task<P>> {
        self.tasks.lock().remove(id)
    }

    /// Remove and return every task whose dispatch exceeded `timeout` as of
    /// `now`.
    ///
    /// Removal happens inside the same locked scan, so a task returned here
    /// is guaranteed absent from the registry and cannot be reclaimed twice.
    pub fn scan_expired(&self, timeout: Duration, now: Instant) -> Vec<Task<P>> {
        let mut tasks = self.tasks.lock();
        let expired_ids: Vec<TaskId> = tasks
            .values()
            .filter(|t| t.expired(timeout, now))
            .map(|t| t.id)
            .collect();
        expired_ids
            .iter()
            .filter_map(|id| tasks.remove(id))
            .collect()
    }

    /// Remove every entry belonging to `job_id` and hand the removed tasks
    /// back for observability; they are never requeued.
    ///
    /// Best-effort cleanup: a task pulled by a worker but not yet tracked is
    /// not covered.
    pub fn purge_job(&self, job_id: &JobId) -> Vec<Task<P>> {
        let mut tasks = self.tasks.lock();
        let doomed: Vec<TaskId> = tasks
            .values()
            .filter(|t| &t.job_id == job_id)
            .map(|t| t.id)
            .collect();
        doomed.iter().filter_map(|id| tasks.remove(id)).collect()
    }

    /// Number of tasks currently tracked as active.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether no task is currently active.
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl<P> Default for ActiveRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
