//! Configuration models for the scheduler and local resource limits.

pub mod scheduler;

pub use scheduler::{ResourceConfig, SchedulerConfig};
