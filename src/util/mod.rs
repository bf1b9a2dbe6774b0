//! Shared utilities.

/// Wall-clock helpers.
pub mod clock;
/// Shared serde-visible types: task, job, and unit identifiers.
pub mod serde;
/// Telemetry helpers for structured logging and tracing.
pub mod telemetry;

pub use clock::*;
pub use serde::*;
pub use telemetry::*;
