//! Tests for the audit sink

use render_dispatch::core::{build_audit_event, AuditSink, InMemoryAuditSink};
use render_dispatch::util::serde::{JobId, TaskId};

#[test]
fn test_build_audit_event_fields() {
    let task_id = TaskId::generate();
    let event = build_audit_event(task_id, JobId::new("job-1"), "drop", 4, Some("why".into()));

    assert_eq!(event.task_id, task_id);
    assert_eq!(event.action, "drop");
    assert_eq!(event.retry_count, 4);
    assert_eq!(event.detail.as_deref(), Some("why"));
    assert!(event.event_id.starts_with(&format!("{task_id}-drop-")));
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_in_memory_sink_records() {
    let mut sink = InMemoryAuditSink::new(8);
    let task_id = TaskId::generate();
    sink.record(build_audit_event(task_id, JobId::new("job-1"), "enqueue", 0, None));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "enqueue");
}

#[test]
fn test_in_memory_sink_is_bounded() {
    let mut sink = InMemoryAuditSink::new(2);
    for action in ["enqueue", "dispatch", "complete"] {
        sink.record(build_audit_event(
            TaskId::generate(),
            JobId::new("job-1"),
            action,
            0,
            None,
        ));
    }

    // Oldest event evicted once the buffer is full.
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "dispatch");
    assert_eq!(events[1].action, "complete");
}
