//! Agent communication boundary.
//!
//! The scheduler consumes this interface to place tasks on remote peers and
//! to notify them of cancellations; peer discovery and the wire transport
//! live behind it. Implementations translate discovered peers into
//! [`AgentComms::find_best_node_for_task`] answers and deliver
//! `task:status:updated` notifications back to the scheduler as
//! [`TaskStatusUpdate`] values.

/// In-memory adapter for development/testing.
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::AppResult;
use crate::core::task::{PeerId, ResourceRequirement, Task, TaskId};
use crate::util::clock::now_ms;

/// Wire name of the remote status notification the scheduler consumes.
pub const TASK_STATUS_UPDATED: &str = "task:status:updated";

/// Serializable subset of a task handed to a peer on remote dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Task identifier.
    pub task_id: TaskId,
    /// Ordering key; higher runs first.
    pub priority: i32,
    /// Resources the task needs.
    pub requirement: ResourceRequirement,
    /// Opaque payload supplied at submission.
    pub payload: serde_json::Value,
}

impl TaskDescriptor {
    /// Build a descriptor from a task record.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            priority: task.priority,
            requirement: task.requirement.clone(),
            payload: task.payload.clone(),
        }
    }
}

/// Terminal outcome reported by a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteTaskStatus {
    /// The peer finished the task successfully.
    Completed,
    /// The peer failed the task.
    Failed,
}

/// A `task:status:updated` notification from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    /// Task the update refers to.
    pub task_id: TaskId,
    /// Reported outcome.
    pub status: RemoteTaskStatus,
    /// Error detail for failed outcomes.
    pub error: Option<String>,
}

/// Payload of a peer-directed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MessagePayload {
    /// Ask the peer to abort a task it was assigned.
    CancelTask {
        /// Task to abort.
        task_id: TaskId,
    },
}

/// A message addressed to one peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Destination peer.
    pub to: PeerId,
    /// Message payload.
    pub payload: MessagePayload,
    /// Send time, milliseconds since epoch.
    pub sent_at_ms: u128,
}

impl MessageEnvelope {
    /// Build a cancellation notice for the given peer and task.
    #[must_use]
    pub fn cancel_task(to: PeerId, task_id: TaskId) -> Self {
        Self {
            to,
            payload: MessagePayload::CancelTask { task_id },
            sent_at_ms: now_ms(),
        }
    }
}

/// Interface the scheduler consumes to reach remote agents.
#[async_trait]
pub trait AgentComms: Send + Sync {
    /// Find the most suitable peer for a requirement, if any peer can host
    /// it right now.
    async fn find_best_node_for_task(&self, requirement: &ResourceRequirement) -> Option<PeerId>;

    /// Dispatch a task to the peer. `Ok(true)` means the peer accepted,
    /// `Ok(false)` that it declined; transport failures are errors.
    async fn assign_task(&self, task: &TaskDescriptor, peer: &PeerId) -> AppResult<bool>;

    /// Deliver a message (cancellation notices) to a peer.
    async fn send_message(&self, envelope: MessageEnvelope) -> AppResult<()>;
}
