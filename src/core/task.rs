//! Task entity and payload abstraction.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;
use crate::util::serde::{JobId, TaskId, UnitId};

/// Marker trait for schedulable work payloads.
///
/// Payloads must be Send + Sync for cross-task dispatch, Clone because the
/// registry keeps the canonical copy while the pulling worker holds its own,
/// and Serialize + Deserialize because they arrive over the wire.
pub trait WorkPayload:
    Send + Sync + Clone + Serialize + for<'de> Deserialize<'de> + 'static
{
}

/// Blanket implementation: any type meeting the requirements is a WorkPayload.
impl<P> WorkPayload for P where
    P: Send + Sync + Clone + Serialize + for<'de> Deserialize<'de> + 'static
{
}

/// One schedulable unit of work: immutable identity plus mutable scheduling
/// metadata.
///
/// The scheduler never inspects `payload`; it only moves the task between the
/// pending queue and the active registry. A task lives in exactly one of the
/// two at any instant.
#[derive(Debug, Clone)]
pub struct Task<P> {
    /// Unique identity, assigned at enqueue, never changes across requeues.
    pub id: TaskId,
    /// Owning job; used only for bulk purge.
    pub job_id: JobId,
    /// Work unit within the job (frame or tile); opaque here.
    pub unit_id: UnitId,
    /// Opaque work description.
    pub payload: P,
    /// Wall-clock ms at enqueue, refreshed on every requeue. Observability
    /// only; queue order is structural FIFO.
    pub created_at_ms: u128,
    /// Monotonic timestamp recorded when a worker pulls the task. `None`
    /// while pending. Basis for timeout detection.
    pub dispatched_at: Option<Instant>,
    /// How many times the sweeper has reclaimed this task. Monotonic.
    pub retry_count: u32,
}

impl<P> Task<P> {
    /// Build a fresh pending task with a generated id.
    pub fn new(payload: P, job_id: JobId, unit_id: UnitId) -> Self {
        Self {
            id: TaskId::generate(),
            job_id,
            unit_id,
            payload,
            created_at_ms: now_ms(),
            dispatched_at: None,
            retry_count: 0,
        }
    }

    /// Whether the task has been active longer than `timeout` as of `now`.
    /// A task that was never dispatched is not expired.
    pub fn expired(&self, timeout: Duration, now: Instant) -> bool {
        self.dispatched_at
            .is_some_and(|at| now.saturating_duration_since(at) > timeout)
    }

    /// Reset the observability timestamp before the task re-enters the queue.
    pub(crate) fn refresh_created(&mut self) {
        self.created_at_ms = now_ms();
        self.dispatched_at = None;
    }
}
