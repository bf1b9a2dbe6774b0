//! Queue backends.

/// Bounded in-memory channel queue.
pub mod memory;

pub use memory::BoundedWorkQueue;
