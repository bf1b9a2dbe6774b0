//! Tests for shared utilities

use std::collections::HashSet;

use render_dispatch::util::clock::now_ms;
use render_dispatch::util::serde::{JobId, TaskId, UnitId};

#[test]
fn test_now_ms_is_monotonic_enough() {
    let first = now_ms();
    let second = now_ms();
    assert!(first > 0);
    assert!(second >= first);
}

#[test]
fn test_task_ids_are_unique() {
    let ids: HashSet<TaskId> = (0..100).map(|_| TaskId::generate()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_task_id_display_round_trips_through_serde() {
    let id = TaskId::generate();
    let json = serde_json::to_string(&id).unwrap();
    let back: TaskId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
    assert_eq!(json.trim_matches('"'), format!("{id}"));
}

#[test]
fn test_job_and_unit_ids_wrap_strings() {
    let job = JobId::new("job-42");
    let unit = UnitId::new("frame-0001");
    assert_eq!(job.as_str(), "job-42");
    assert_eq!(unit.as_str(), "frame-0001");
    assert_eq!(format!("{job}"), "job-42");
    assert_eq!(format!("{unit}"), "frame-0001");
}
