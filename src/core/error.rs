//! Error types for scheduler operations.

use thiserror::Error;

use crate::util::serde::TaskId;

/// Errors produced by scheduler components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Work queue is at capacity; the submission must be rejected or retried.
    #[error("queue full: {0}")]
    QueueFull(String),
    /// The dequeue caller's cancellation signal fired.
    #[error("dequeue cancelled")]
    Cancelled,
    /// Operation referenced a task id the scheduler is not tracking.
    #[error("unknown task: {0}")]
    NotFound(TaskId),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
