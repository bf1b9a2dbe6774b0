//! Audit sink implementations.
//!
//! Every scheduling action flows through an [`AuditSink`] so that terminal
//! outcomes the scheduler cannot surface to any caller (permanent drops and
//! tasks lost to a full queue) stay observable.

use std::collections::VecDeque;

use crate::util::clock::now_ms;
use crate::util::serde::{JobId, TaskId};

/// Audit event structure.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Related task identifier.
    pub task_id: TaskId,
    /// Owning job identifier.
    pub job_id: JobId,
    /// Action taken (enqueue, dispatch, complete, requeue, reclaim, drop,
    /// lost, purge).
    pub action: String,
    /// Retry count of the task at the time of the event.
    pub retry_count: u32,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    task_id: TaskId,
    job_id: JobId,
    action: impl Into<String>,
    retry_count: u32,
    detail: Option<String>,
) -> AuditEvent {
    let action = action.into();
    let created_at_ms = now_ms();
    AuditEvent {
        event_id: format!("{task_id}-{action}-{created_at_ms}"),
        task_id,
        job_id,
        action,
        retry_count,
        created_at_ms,
        detail,
    }
}
