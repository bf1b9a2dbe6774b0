//! API-facing request/response models.
//!
//! These are the types the coordinator's network service moves across the
//! wire. The scheduler core stays generic over any [`WorkPayload`]; this
//! module pins down the concrete work kinds the render farm actually ships.

use serde::{Deserialize, Serialize};

use crate::core::{Scheduler, SchedulerError, WorkQueue};
use crate::util::serde::{JobId, TaskId, UnitId};

/// The closed set of work descriptions a worker can receive.
///
/// The scheduler never looks inside; only workers interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkSpec {
    /// Render one frame (or tile) of a scene.
    Render {
        /// Scene reference the worker should load.
        scene: String,
        /// Frame number to render.
        frame: u32,
        /// Samples per pixel.
        samples: u32,
    },
    /// Composite previously rendered frames into an output.
    Composite {
        /// Identifiers of the frames to combine.
        frames: Vec<String>,
        /// Output artifact path.
        output: String,
    },
}

/// Work submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWorkRequest {
    /// Owning job identifier.
    pub job_id: JobId,
    /// Work unit identifier within the job.
    pub unit_id: UnitId,
    /// The work description.
    pub work: WorkSpec,
}

/// Work submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWorkResponse {
    /// Identifier assigned to the admitted task.
    pub task_id: TaskId,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Submit a unit of work to the scheduler.
///
/// # Errors
///
/// Propagates [`SchedulerError::QueueFull`] so the service layer can reject
/// the submission with backpressure semantics.
pub fn submit_work<Q>(
    scheduler: &Scheduler<WorkSpec, Q>,
    req: SubmitWorkRequest,
) -> Result<SubmitWorkResponse, SchedulerError>
where
    Q: WorkQueue<WorkSpec>,
{
    let task_id = scheduler.enqueue(req.work, req.job_id, req.unit_id)?;
    Ok(SubmitWorkResponse { task_id })
}

/// Return a health payload.
pub fn health() -> Health {
    Health { ok: true }
}
