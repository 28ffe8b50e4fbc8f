//! Error types for scheduler operations.

use thiserror::Error;

use crate::core::task::{TaskId, TaskStatus};

/// Errors produced by scheduler components.
///
/// Admission failures are synchronous and leave task state untouched; the
/// scheduling pass treats [`SchedulerError::ResourceUnavailable`] and
/// [`SchedulerError::NoPeerAvailable`] as benign (the task stays pending for
/// the next pass) while direct callers see them as distinct conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The task id is not present in the task set.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The task is already in the running set.
    #[error("task {0} is already running")]
    TaskAlreadyRunning(TaskId),
    /// The task is in a terminal state and cannot be executed.
    #[error("task {id} is {status}, not pending")]
    TaskNotPending {
        /// Task identifier.
        id: TaskId,
        /// Status the task was found in.
        status: TaskStatus,
    },
    /// At least one declared dependency has not completed.
    #[error("task {0} has unmet dependencies")]
    DependenciesUnmet(TaskId),
    /// The configured concurrency limit is saturated.
    #[error("already at capacity: {limit} tasks running")]
    AtCapacity {
        /// Configured maximum number of simultaneously running tasks.
        limit: usize,
    },
    /// No peer can currently host the task's requirement.
    #[error("no peer available for task {0}")]
    NoPeerAvailable(TaskId),
    /// Neither local nor cluster capacity can admit the requirement.
    #[error("insufficient resources for task {0}")]
    ResourceUnavailable(TaskId),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
