//! Scheduler construction from configuration.

use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::core::{Scheduler, SchedulerError, SchedulerLimits, WorkPayload};
use crate::infra::queue::BoundedWorkQueue;

/// Build a scheduler over a bounded in-memory queue from validated
/// configuration.
///
/// The sweeper is not started; call [`Scheduler::start_sweeper`] once during
/// system initialization, and attach an audit sink beforehand with
/// [`Scheduler::with_audit`] if one is wanted.
pub fn build_scheduler<P>(
    cfg: &SchedulerConfig,
) -> Result<Scheduler<P, BoundedWorkQueue<P>>, SchedulerError>
where
    P: WorkPayload,
{
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;

    let limits = SchedulerLimits {
        max_queue_size: cfg.max_queue_size,
        sweep_interval: Duration::from_millis(cfg.sweep_interval_ms),
        dispatch_timeout: Duration::from_millis(cfg.dispatch_timeout_ms),
        max_retries: cfg.max_retries,
    };

    let queue = BoundedWorkQueue::new(limits.max_queue_size);
    Ok(Scheduler::new(limits, queue))
}
