//! Lifecycle and resource notifications.
//!
//! Events are fanned out on `tokio::sync::broadcast` channels; monitoring and
//! callers subscribe without blocking the emitting component. Each event maps
//! to a stable wire name (`task:added`, `alert`, ...) that external
//! collaborators depend on.

use serde::{Deserialize, Serialize};

use crate::core::task::{ExecutionStrategy, TaskId};

/// Severity of a resource alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Utilization crossed the warning threshold.
    Warning,
    /// Utilization crossed the critical threshold; the scheduler sheds load.
    Critical,
}

/// Resource dimension an alert refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Memory, accounted in megabytes.
    Memory,
    /// CPU, accounted in cores.
    Cpu,
}

/// A threshold-crossing alert, emitted locally or reported by a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAlert {
    /// Resource dimension that crossed a threshold.
    pub resource: ResourceKind,
    /// Severity.
    pub level: AlertLevel,
    /// Human-readable description.
    pub message: String,
    /// Observed utilization percentage.
    pub value: f64,
    /// Threshold that was crossed, as a percentage.
    pub threshold: f64,
    /// Emission time, milliseconds since epoch.
    pub timestamp_ms: u128,
}

/// Notifications emitted by the resource manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// A local threshold crossing (`alert`).
    Alert(ResourceAlert),
    /// An alert reported by a remote node (`remote:alert`).
    RemoteAlert {
        /// Reporting peer.
        node_id: String,
        /// The alert as the peer reported it.
        alert: ResourceAlert,
    },
}

impl ResourceEvent {
    /// Stable wire name for external collaborators.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Alert(_) => "alert",
            Self::RemoteAlert { .. } => "remote:alert",
        }
    }
}

/// Task lifecycle notifications emitted by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskEvent {
    /// A task entered the task set (`task:added`).
    Added {
        /// Task identifier.
        task_id: TaskId,
    },
    /// A task was admitted and started (`task:started`).
    Started {
        /// Task identifier.
        task_id: TaskId,
        /// Placement decided at admission.
        strategy: ExecutionStrategy,
    },
    /// A task finished successfully (`task:completed`).
    Completed {
        /// Task identifier.
        task_id: TaskId,
    },
    /// A failed run was requeued (`task:retry`).
    Retry {
        /// Task identifier.
        task_id: TaskId,
        /// Attempt number just consumed (1-based).
        attempt: u32,
    },
    /// A task failed terminally (`task:failed`).
    Failed {
        /// Task identifier.
        task_id: TaskId,
        /// Error retained on the task record.
        error: String,
    },
    /// A task was cancelled (`task:cancelled`).
    Cancelled {
        /// Task identifier.
        task_id: TaskId,
    },
}

impl TaskEvent {
    /// Stable wire name for external collaborators.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Added { .. } => "task:added",
            Self::Started { .. } => "task:started",
            Self::Completed { .. } => "task:completed",
            Self::Retry { .. } => "task:retry",
            Self::Failed { .. } => "task:failed",
            Self::Cancelled { .. } => "task:cancelled",
        }
    }

    /// Task the event refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Added { task_id }
            | Self::Started { task_id, .. }
            | Self::Completed { task_id }
            | Self::Retry { task_id, .. }
            | Self::Failed { task_id, .. }
            | Self::Cancelled { task_id } => *task_id,
        }
    }
}
