//! Tests for error types

use render_dispatch::core::SchedulerError;
use render_dispatch::util::serde::TaskId;

#[test]
fn test_queue_full_error() {
    let err = SchedulerError::QueueFull("capacity 100 reached".to_string());
    assert_eq!(format!("{}", err), "queue full: capacity 100 reached");
}

#[test]
fn test_cancelled_error() {
    let err = SchedulerError::Cancelled;
    assert_eq!(format!("{}", err), "dequeue cancelled");
}

#[test]
fn test_not_found_error() {
    let id = TaskId::generate();
    let err = SchedulerError::NotFound(id);
    assert_eq!(format!("{}", err), format!("unknown task: {id}"));
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("max_queue_size must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: max_queue_size must be greater than 0"
    );
}

#[test]
fn test_backend_error() {
    let err = SchedulerError::Backend("queue receiver dropped".to_string());
    assert_eq!(format!("{}", err), "backend error: queue receiver dropped");
}
