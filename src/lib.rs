//! # Render Dispatch
//!
//! The task-dispatch core of a distributed rendering coordinator.
//!
//! This library accepts units of render/composite work, hands them out to a
//! pool of remote workers on demand, tracks which worker is processing what,
//! and reclaims work from workers that disappear without finishing. It is the
//! scheduling layer of the coordinator: the network service that receives job
//! submissions and worker pulls is a thin adapter over the [`core::Scheduler`]
//! facade.
//!
//! ## Core Problem Solved
//!
//! Render farm workers are remote, preemptible, and frequently unreliable:
//!
//! - **Workers vanish mid-frame**: a preempted pod never reports back, and its
//!   work must be recovered without operator intervention
//! - **Submission bursts**: an artist submitting a 10,000-frame job must hit
//!   backpressure, not unbounded buffering
//! - **Autoscaling**: external scale-out logic polls queue depth constantly
//!   and must never contend with the dispatch hot path
//!
//! ## Key Features
//!
//! - **Bounded FIFO work queue**: non-blocking admission with a `QueueFull`
//!   rejection once capacity is reached
//! - **Active-task registry**: mutex-guarded tracking of in-flight work,
//!   exposing only atomic compound operations
//! - **Reclamation sweeper**: a periodic background loop that recovers tasks
//!   from dead workers and retries them against a fixed budget
//! - **Lock-free introspection**: queue depth and scheduler statistics read
//!   from atomics, never from the dispatch-path locks
//!
//! ## Example
//!
//! ```rust,ignore
//! use render_dispatch::builders::build_scheduler;
//! use render_dispatch::config::SchedulerConfig;
//! use render_dispatch::util::serde::{JobId, UnitId};
//! use tokio_util::sync::CancellationToken;
//!
//! let scheduler = build_scheduler::<MyPayload>(&SchedulerConfig::default())?;
//! scheduler.start_sweeper();
//!
//! // Submission path
//! let task_id = scheduler.enqueue(payload, JobId::new("job-42"), UnitId::new("frame-0001"))?;
//!
//! // Worker pull loop (typically driven by a streaming RPC)
//! let cancel = CancellationToken::new();
//! let task = scheduler.dequeue(&cancel).await?;
//! // ... worker renders ...
//! scheduler.complete(&task.id);
//! ```
//!
//! For complete examples, see `tests/dispatch_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling components: task entity, registry, sweeper, facade.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct a wired scheduler from configuration.
pub mod builders;
/// Infrastructure adapters for queue backends.
pub mod infra;
/// Collaborator-facing request/response models.
pub mod runtime;
/// Shared utilities.
pub mod util;
