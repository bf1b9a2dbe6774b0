//! Scheduler facade and core scheduling traits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::audit::{build_audit_event, AuditSink};
use crate::core::error::SchedulerError;
use crate::core::registry::ActiveRegistry;
use crate::core::sweeper;
use crate::core::task::{Task, WorkPayload};
use crate::util::serde::{JobId, TaskId, UnitId};

/// Abstraction for queue backends.
///
/// The queue's internal synchronization is the sole coordination point
/// between producers and the dequeue path; no external lock is ever taken
/// around it.
#[async_trait]
pub trait WorkQueue<P>: Send + Sync + 'static {
    /// Enqueue a task if space permits. Non-blocking: a full queue fails
    /// immediately with [`SchedulerError::QueueFull`]; this is the system's
    /// sole admission-control mechanism.
    fn push(&self, task: Task<P>) -> Result<(), SchedulerError>;

    /// Suspend until a task is available or `cancel` fires, in which case the
    /// call fails with [`SchedulerError::Cancelled`]. An already-cancelled
    /// token returns immediately.
    async fn pop(&self, cancel: &CancellationToken) -> Result<Task<P>, SchedulerError>;

    /// Current depth. Must not acquire any lock shared with push/pop: depth
    /// is polled frequently by external autoscaling logic and must never
    /// contend with the hot dispatch path.
    fn len(&self) -> usize;

    /// Whether the queue is currently empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed capacity set at construction.
    fn capacity(&self) -> usize;
}

/// Configuration values consumed by the scheduler at construction.
#[derive(Debug, Clone)]
pub struct SchedulerLimits {
    /// Pending-queue capacity; pushes beyond it are rejected.
    pub max_queue_size: usize,
    /// Sweeper tick period.
    pub sweep_interval: Duration,
    /// Per-task deadline after dispatch before the sweeper reclaims it.
    pub dispatch_timeout: Duration,
    /// Reclamations a task may undergo before being permanently dropped.
    pub max_retries: u32,
}

/// Statistics about scheduler state and terminal outcomes.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStats {
    /// Tasks currently pending in the queue.
    pub queued: usize,
    /// Tasks currently dispatched to workers.
    pub active: usize,
    /// Total tasks admitted through enqueue.
    pub submitted: u64,
    /// Total tasks completed by workers.
    pub completed: u64,
    /// Total requeues (sweeper reclamations plus worker-disconnect returns).
    pub requeued: u64,
    /// Tasks permanently dropped after exhausting the retry budget.
    pub dropped: u64,
    /// Tasks lost because the queue was full when a requeue was attempted.
    pub lost: u64,
}

/// Internal counters for scheduler statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub submitted: AtomicU64,
    pub completed: AtomicU64,
    pub requeued: AtomicU64,
    pub dropped: AtomicU64,
    pub lost: AtomicU64,
}

impl SchedulerCounters {
    /// Get a snapshot of current statistics, combining the counters with the
    /// queue/registry gauges supplied by the caller.
    pub fn snapshot(&self, queued: usize, active: usize) -> SchedulerStats {
        SchedulerStats {
            queued,
            active,
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            requeued: self.requeued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            lost: self.lost.load(Ordering::Relaxed),
        }
    }
}

/// The dispatch facade: bounded work queue + active-task registry +
/// reclamation sweeper behind one public contract.
///
/// Any number of producers, any number of worker-facing dequeue callers, and
/// exactly one sweeper share a single instance. Only [`Scheduler::dequeue`]
/// suspends the caller; every other operation is non-blocking or bounded by
/// one short-held lock.
pub struct Scheduler<P, Q>
where
    P: WorkPayload,
    Q: WorkQueue<P>,
{
    limits: SchedulerLimits,
    queue: Arc<Q>,
    registry: Arc<ActiveRegistry<P>>,
    counters: Arc<SchedulerCounters>,
    audit: Option<Arc<Mutex<Box<dyn AuditSink>>>>,
    /// Bound to the scheduler lifetime; cancelling it stops the sweeper.
    cancel: CancellationToken,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<P, Q> Scheduler<P, Q>
where
    P: WorkPayload,
    Q: WorkQueue<P>,
{
    /// Create a new scheduler from limits and a queue backend.
    ///
    /// The sweeper is not running yet; call [`Scheduler::start_sweeper`] once
    /// during system initialization.
    pub fn new(limits: SchedulerLimits, queue: Q) -> Self {
        Self {
            limits,
            queue: Arc::new(queue),
            registry: Arc::new(ActiveRegistry::new()),
            counters: Arc::new(SchedulerCounters::default()),
            audit: None,
            cancel: CancellationToken::new(),
            sweeper: Mutex::new(None),
        }
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Arc::new(Mutex::new(audit)));
        self
    }

    /// Limits this scheduler was constructed with.
    pub fn limits(&self) -> &SchedulerLimits {
        &self.limits
    }

    /// Admit a new unit of work.
    ///
    /// Generates a fresh task id, stamps `created_at_ms`, and attempts a
    /// non-blocking push. Fails with [`SchedulerError::QueueFull`] at
    /// capacity; no side effect occurs on failure.
    pub fn enqueue(
        &self,
        payload: P,
        job_id: JobId,
        unit_id: UnitId,
    ) -> Result<TaskId, SchedulerError> {
        let task = Task::new(payload, job_id, unit_id);
        let task_id = task.id;
        let job_id = task.job_id.clone();

        if let Err(e) = self.queue.push(task) {
            tracing::warn!(
                "task {task_id} rejected: queue full (depth={})",
                self.queue.len()
            );
            return Err(e);
        }

        self.counters.submitted.fetch_add(1, Ordering::Relaxed);
        self.record_audit(task_id, &job_id, "enqueue", 0, None);
        tracing::debug!("task {task_id} enqueued for job {job_id}");
        Ok(task_id)
    }

    /// Hand out the next pending task to a worker.
    ///
    /// Blocks until a task is available or `cancel` fires. On success the
    /// task is recorded as active (`dispatched_at = now`) before it is
    /// returned; on cancellation the call fails with
    /// [`SchedulerError::Cancelled`] and the registry is untouched.
    pub async fn dequeue(&self, cancel: &CancellationToken) -> Result<Task<P>, SchedulerError> {
        let mut task = self.queue.pop(cancel).await?;
        let now = Instant::now();
        task.dispatched_at = Some(now);
        self.registry.track(task.clone(), now);

        self.record_audit(task.id, &task.job_id, "dispatch", task.retry_count, None);
        tracing::debug!("task {} dispatched to a worker", task.id);
        Ok(task)
    }

    /// A worker reported success: release the task from active tracking.
    ///
    /// A no-op for unknown ids: the task may already have timed out and been
    /// reclaimed before the (slow) worker's report arrived. That race is
    /// benign and deliberately not an error.
    pub fn complete(&self, id: &TaskId) {
        if let Some(task) = self.registry.release(id) {
            self.counters.completed.fetch_add(1, Ordering::Relaxed);
            self.record_audit(task.id, &task.job_id, "complete", task.retry_count, None);
            tracing::debug!("task {id} completed");
        } else {
            tracing::debug!("completion for unknown task {id}, ignoring");
        }
    }

    /// A worker disconnected without finishing: return its task to the queue.
    ///
    /// The push back is a single synchronous best-effort attempt; if the
    /// queue is full the task is lost, counted, and audited rather than
    /// retried in the background. A no-op for unknown ids.
    pub fn requeue(&self, id: &TaskId) {
        let Some(mut task) = self.registry.release(id) else {
            tracing::debug!("requeue for unknown task {id}, ignoring");
            return;
        };

        task.refresh_created();
        let task_id = task.id;
        let job_id = task.job_id.clone();
        let retry_count = task.retry_count;

        match self.queue.push(task) {
            Ok(()) => {
                self.counters.requeued.fetch_add(1, Ordering::Relaxed);
                self.record_audit(task_id, &job_id, "requeue", retry_count, None);
                tracing::info!("worker disconnect: task {task_id} returned to queue");
            }
            Err(e) => {
                self.counters.lost.fetch_add(1, Ordering::Relaxed);
                self.record_audit(task_id, &job_id, "lost", retry_count, Some(e.to_string()));
                tracing::warn!("queue full, lost task {task_id} from disconnected worker");
            }
        }
    }

    /// Instantaneous pending-task count. Lock-free; safe to poll at high
    /// frequency from autoscaling logic.
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    /// Number of tasks currently dispatched to workers.
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    /// Drop all of a job's currently-active tasks from tracking, returning
    /// how many were removed.
    ///
    /// Pending tasks of the job still sitting in the queue are not touched;
    /// they drain through workers normally. This is a known limitation of the
    /// purge path, not an oversight.
    pub fn purge_job(&self, job_id: &JobId) -> usize {
        let purged = self.registry.purge_job(job_id);
        for task in &purged {
            self.record_audit(task.id, &task.job_id, "purge", task.retry_count, None);
        }
        if !purged.is_empty() {
            tracing::info!("purged {} active tasks of job {job_id}", purged.len());
        }
        purged.len()
    }

    /// Snapshot of counters and gauges.
    pub fn stats(&self) -> SchedulerStats {
        self.counters.snapshot(self.queue.len(), self.registry.len())
    }

    /// Start the reclamation sweeper. Call once during system
    /// initialization; repeated calls are ignored with a warning.
    pub fn start_sweeper(&self) {
        let mut slot = self.sweeper.lock();
        if slot.is_some() {
            tracing::warn!("sweeper already running, ignoring start");
            return;
        }
        *slot = Some(sweeper::spawn(
            Arc::clone(&self.queue),
            Arc::clone(&self.registry),
            Arc::clone(&self.counters),
            self.audit.clone(),
            self.limits.clone(),
            self.cancel.clone(),
        ));
    }

    /// Stop the sweeper and wait for it to exit.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        tracing::info!("scheduler shut down");
    }

    /// Record an audit event (sync operation with parking_lot mutex).
    fn record_audit(
        &self,
        task_id: TaskId,
        job_id: &JobId,
        action: &str,
        retry_count: u32,
        detail: Option<String>,
    ) {
        if let Some(sink) = &self.audit {
            sink.lock().record(build_audit_event(
                task_id,
                job_id.clone(),
                action,
                retry_count,
                detail,
            ));
        }
    }
}
