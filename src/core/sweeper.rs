//! Reclamation sweeper: periodic recovery of tasks from dead workers.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::audit::{build_audit_event, AuditSink};
use crate::core::registry::ActiveRegistry;
use crate::core::scheduler::{SchedulerCounters, SchedulerLimits, WorkQueue};
use crate::core::task::WorkPayload;
use crate::util::serde::{JobId, TaskId};

type SharedAudit = Option<Arc<Mutex<Box<dyn AuditSink>>>>;

/// Spawn the sweeper loop.
///
/// The loop wakes every `sweep_interval`, reclaims timed-out tasks, and exits
/// only when `cancel` fires. A tick's expired-task list is allowed to finish
/// processing after cancellation is requested; none of that work blocks.
pub(crate) fn spawn<P, Q>(
    queue: Arc<Q>,
    registry: Arc<ActiveRegistry<P>>,
    counters: Arc<SchedulerCounters>,
    audit: SharedAudit,
    limits: SchedulerLimits,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    P: WorkPayload,
    Q: WorkQueue<P>,
{
    tokio::spawn(async move {
        info!(
            "reclamation sweeper started (interval={:?}, timeout={:?})",
            limits.sweep_interval, limits.dispatch_timeout
        );
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("reclamation sweeper stopped");
                    break;
                }
                () = tokio::time::sleep(limits.sweep_interval) => {
                    debug!("sweeper scan");
                    let found = sweep_expired(
                        queue.as_ref(),
                        &registry,
                        &counters,
                        audit.as_ref(),
                        &limits,
                    );
                    if found > 0 {
                        info!("sweeper reclaimed {found} timed-out tasks");
                    }
                }
            }
        }
    })
}

/// One sweep pass: remove expired tasks from the registry in a single locked
/// scan, then decide each task's fate outside any lock so the rest of the
/// scheduler keeps running. Returns how many tasks were found expired.
///
/// A reclaimed task re-enters the queue at the tail and loses its original
/// FIFO position.
pub(crate) fn sweep_expired<P, Q>(
    queue: &Q,
    registry: &ActiveRegistry<P>,
    counters: &SchedulerCounters,
    audit: Option<&Arc<Mutex<Box<dyn AuditSink>>>>,
    limits: &SchedulerLimits,
) -> usize
where
    P: WorkPayload,
    Q: WorkQueue<P>,
{
    let expired = registry.scan_expired(limits.dispatch_timeout, Instant::now());
    let found = expired.len();

    for mut task in expired {
        task.retry_count += 1;
        let task_id = task.id;
        let job_id = task.job_id.clone();
        let retry_count = task.retry_count;

        if retry_count > limits.max_retries {
            counters.dropped.fetch_add(1, Ordering::Relaxed);
            record(
                audit,
                task_id,
                job_id,
                "drop",
                retry_count,
                Some(format!("retry budget {} exhausted", limits.max_retries)),
            );
            warn!("task {task_id} timed out {retry_count} times, dropping permanently");
            continue;
        }

        task.refresh_created();
        match queue.push(task) {
            Ok(()) => {
                counters.requeued.fetch_add(1, Ordering::Relaxed);
                record(audit, task_id, job_id, "reclaim", retry_count, None);
                info!(
                    "worker timeout: requeued task {task_id} (retry {retry_count}/{})",
                    limits.max_retries
                );
            }
            Err(e) => {
                counters.lost.fetch_add(1, Ordering::Relaxed);
                record(audit, task_id, job_id, "lost", retry_count, Some(e.to_string()));
                warn!("queue full, lost timed-out task {task_id}");
            }
        }
    }

    found
}

fn record(
    audit: Option<&Arc<Mutex<Box<dyn AuditSink>>>>,
    task_id: TaskId,
    job_id: JobId,
    action: &str,
    retry_count: u32,
    detail: Option<String>,
) {
    if let Some(sink) = audit {
        sink.lock()
            .record(build_audit_event(task_id, job_id, action, retry_count, detail));
    }
}
