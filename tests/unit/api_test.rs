//! Tests for API-facing models

use render_dispatch::builders::build_scheduler;
use render_dispatch::config::SchedulerConfig;
use render_dispatch::runtime::api::{health, submit_work, SubmitWorkRequest, WorkSpec};
use render_dispatch::util::serde::{JobId, UnitId};
use tokio_util::sync::CancellationToken;

#[test]
fn test_submit_request_parses_from_wire_json() {
    let json = r#"{
        "job_id": "job-42",
        "unit_id": "frame-0001",
        "work": {
            "kind": "render",
            "scene": "shot-010/main.usd",
            "frame": 101,
            "samples": 256
        }
    }"#;

    let req: SubmitWorkRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.job_id, JobId::new("job-42"));
    assert_eq!(req.unit_id, UnitId::new("frame-0001"));
    assert!(matches!(req.work, WorkSpec::Render { frame: 101, .. }));
}

#[tokio::test]
async fn test_submit_work_admits_and_dispatches() {
    let scheduler = build_scheduler::<WorkSpec>(&SchedulerConfig::default()).unwrap();

    let req = SubmitWorkRequest {
        job_id: JobId::new("job-42"),
        unit_id: UnitId::new("frame-0001"),
        work: WorkSpec::Composite {
            frames: vec!["frame-0001".into(), "frame-0002".into()],
            output: "out/shot-010.exr".into(),
        },
    };

    let resp = submit_work(&scheduler, req).unwrap();

    let cancel = CancellationToken::new();
    let task = scheduler.dequeue(&cancel).await.unwrap();
    assert_eq!(task.id, resp.task_id);
    assert!(matches!(task.payload, WorkSpec::Composite { .. }));
}

#[test]
fn test_health() {
    assert!(health().ok);
}
