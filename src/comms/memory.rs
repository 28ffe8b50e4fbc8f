//! In-memory agent communication adapter for development/testing.
//!
//! Holds a static peer table and records every dispatch and message instead
//! of talking to a transport. Tests script peer capacity and acceptance and
//! inspect what the scheduler sent.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::comms::{AgentComms, MessageEnvelope, TaskDescriptor};
use crate::core::error::AppResult;
use crate::core::task::{PeerId, ResourceRequirement};

/// A peer entry in the static table.
#[derive(Debug, Clone)]
pub struct StaticPeer {
    /// Peer identifier.
    pub id: PeerId,
    /// Memory the peer can currently host, megabytes.
    pub available_memory_mb: u64,
    /// CPU cores the peer can currently host.
    pub available_cpu_cores: u32,
}

/// In-memory [`AgentComms`] with a fixed peer table and scripted outcomes.
#[derive(Debug, Default)]
pub struct StaticComms {
    peers: Mutex<Vec<StaticPeer>>,
    assignments: Mutex<Vec<(PeerId, TaskDescriptor)>>,
    messages: Mutex<Vec<MessageEnvelope>>,
    decline_assignments: AtomicBool,
    fail_transport: AtomicBool,
}

impl StaticComms {
    /// Create an adapter with no peers; every placement query returns none.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer to the table.
    #[must_use]
    pub fn with_peer(self, id: impl Into<PeerId>, memory_mb: u64, cpu_cores: u32) -> Self {
        self.peers.lock().push(StaticPeer {
            id: id.into(),
            available_memory_mb: memory_mb,
            available_cpu_cores: cpu_cores,
        });
        self
    }

    /// Script subsequent `assign_task` calls to be declined by the peer.
    pub fn decline_assignments(&self, decline: bool) {
        self.decline_assignments.store(decline, Ordering::Release);
    }

    /// Script subsequent `assign_task`/`send_message` calls to fail as
    /// transport errors.
    pub fn fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::Release);
    }

    /// Dispatches recorded so far, in order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(PeerId, TaskDescriptor)> {
        self.assignments.lock().clone()
    }

    /// Messages recorded so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<MessageEnvelope> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl AgentComms for StaticComms {
    async fn find_best_node_for_task(&self, requirement: &ResourceRequirement) -> Option<PeerId> {
        let peers = self.peers.lock();
        peers
            .iter()
            .filter(|peer| {
                requirement.memory_mb <= peer.available_memory_mb
                    && requirement.cpu_cores <= peer.available_cpu_cores
            })
            .max_by_key(|peer| peer.available_memory_mb)
            .map(|peer| peer.id.clone())
    }

    async fn assign_task(&self, task: &TaskDescriptor, peer: &PeerId) -> AppResult<bool> {
        if self.fail_transport.load(Ordering::Acquire) {
            anyhow::bail!("transport unavailable");
        }
        if self.decline_assignments.load(Ordering::Acquire) {
            return Ok(false);
        }
        self.assignments.lock().push((peer.clone(), task.clone()));
        Ok(true)
    }

    async fn send_message(&self, envelope: MessageEnvelope) -> AppResult<()> {
        if self.fail_transport.load(Ordering::Acquire) {
            anyhow::bail!("transport unavailable");
        }
        self.messages.lock().push(envelope);
        Ok(())
    }
}
