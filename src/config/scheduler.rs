//! Scheduler configuration structures.

use serde::{Deserialize, Serialize};

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Pending-queue capacity before submissions are rejected.
    pub max_queue_size: usize,
    /// Sweeper tick period in milliseconds.
    pub sweep_interval_ms: u64,
    /// Per-task deadline in milliseconds before the sweeper reclaims it.
    pub dispatch_timeout_ms: u64,
    /// Reclamations a task may undergo before being permanently dropped.
    pub max_retries: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_queue_size: 1000,
            sweep_interval_ms: 10_000,
            dispatch_timeout_ms: 300_000,
            max_retries: 3,
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_queue_size == 0 {
            return Err("max_queue_size must be greater than 0".into());
        }
        if self.sweep_interval_ms == 0 {
            return Err("sweep_interval_ms must be greater than 0".into());
        }
        if self.dispatch_timeout_ms == 0 {
            return Err("dispatch_timeout_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: SchedulerConfig =
            serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
