//! Resource manager: the single source of truth for "can we take on more
//! work," locally and cluster-wide, with time-bounded reclamation of grants.
//!
//! Wraps the [`ResourceLedger`] behind a mutex with short, never-across-await
//! critical sections. Every successful reservation arms a single-fire expiry
//! timer; explicit release and expiry both funnel through ledger removal, so
//! a grant is returned exactly once no matter which happens first.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::config::ResourceConfig;
use crate::core::events::{AlertLevel, ResourceAlert, ResourceEvent, ResourceKind};
use crate::core::ledger::{
    ClusterMetrics, ClusterUpdate, LocalResourceSnapshot, ResourceLedger, ResourceUtilization,
};
use crate::core::task::{ResourceRequirement, TaskId};
use crate::core::timer::{self, Spawn, TimerHandle};
use crate::util::clock::now_ms;

/// Combined local and cluster view returned by
/// [`ResourceManager::enhanced_metrics`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnhancedMetrics {
    /// Local limits, reserved totals, availability, and utilization.
    pub local: LocalResourceSnapshot,
    /// Aggregate cluster view.
    pub cluster: ClusterMetrics,
    /// Number of active reservations.
    pub reservations: usize,
}

/// Last alert level emitted per resource dimension, used to report threshold
/// crossings once instead of on every reservation.
#[derive(Debug, Default)]
struct ThresholdLevels {
    memory: Option<AlertLevel>,
    cpu: Option<AlertLevel>,
}

/// Admission, reservation, and cluster accounting for one node.
pub struct ResourceManager<S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    config: ResourceConfig,
    ledger: Mutex<ResourceLedger>,
    timers: Mutex<HashMap<TaskId, TimerHandle>>,
    levels: Mutex<ThresholdLevels>,
    events: broadcast::Sender<ResourceEvent>,
    spawner: S,
    /// Handle to ourselves for expiry timers; never keeps the manager alive.
    weak_self: Weak<Self>,
}

impl<S> ResourceManager<S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Create a manager with the given limits and spawner for expiry timers.
    pub fn new(config: ResourceConfig, spawner: S) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        let ledger = ResourceLedger::new(config.max_memory_mb, config.max_cpu_cores);
        Arc::new_cyclic(|weak| Self {
            config,
            ledger: Mutex::new(ledger),
            timers: Mutex::new(HashMap::new()),
            levels: Mutex::new(ThresholdLevels::default()),
            events,
            spawner,
            weak_self: weak.clone(),
        })
    }

    /// Subscribe to `alert` / `remote:alert` notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.events.subscribe()
    }

    /// Advisory admission check: local fit first, cluster availability as a
    /// fallback. Zero-cost requirements always pass. Side-effect free;
    /// [`ResourceManager::reserve_resources`] re-checks authoritatively.
    #[must_use]
    pub fn can_handle_task(&self, requirement: &ResourceRequirement) -> bool {
        self.ledger.lock().can_admit(requirement)
    }

    /// Advisory local-only admission check, used for placement decisions
    /// where cluster capacity is not an acceptable substitute.
    #[must_use]
    pub fn can_handle_locally(&self, requirement: &ResourceRequirement) -> bool {
        let ledger = self.ledger.lock();
        requirement.is_zero() || ledger.fits_locally(requirement)
    }

    /// Atomically re-check admissibility and record a reservation for the
    /// task, arming an expiry timer that auto-releases the grant.
    ///
    /// The timeout comes from the requirement override or the configured
    /// reservation default. Returns false without side effects when the task
    /// already holds a reservation or the requirement no longer fits.
    pub fn reserve_resources(&self, task_id: TaskId, requirement: &ResourceRequirement) -> bool {
        let timeout = requirement
            .timeout()
            .unwrap_or_else(|| self.config.reservation_timeout());
        let expires_at_ms = now_ms() + timeout.as_millis();
        let reserved = self
            .ledger
            .lock()
            .try_reserve(task_id, requirement, expires_at_ms);
        if !reserved {
            debug!(task_id = %task_id, "reservation rejected");
            return false;
        }

        let manager = self.weak_self.clone();
        let handle = timer::arm(&self.spawner, timeout, async move {
            if let Some(manager) = manager.upgrade() {
                manager.expire_reservation(task_id);
            }
        });
        if let Some(stale) = self.timers.lock().insert(task_id, handle) {
            stale.cancel();
        }

        debug!(
            task_id = %task_id,
            memory_mb = requirement.memory_mb,
            cpu_cores = requirement.cpu_cores,
            timeout_ms = timeout.as_millis() as u64,
            "resources reserved"
        );
        self.emit_threshold_alerts();
        true
    }

    /// Release the reservation held by the task, if any, and disarm its
    /// expiry timer. Idempotent: a second call is a no-op and the in-use
    /// totals are never decremented twice.
    pub fn release_resources(&self, task_id: TaskId) {
        if let Some(handle) = self.timers.lock().remove(&task_id) {
            handle.cancel();
        }
        if self.ledger.lock().remove(task_id).is_some() {
            debug!(task_id = %task_id, "resources released");
        }
        self.emit_threshold_alerts();
    }

    /// Expiry path: reclaim a grant whose owner never released it.
    fn expire_reservation(&self, task_id: TaskId) {
        self.timers.lock().remove(&task_id);
        if self.ledger.lock().remove(task_id).is_some() {
            warn!(task_id = %task_id, "reservation expired without release, reclaimed");
        }
    }

    /// True when the task holds an active reservation.
    #[must_use]
    pub fn has_reservation(&self, task_id: TaskId) -> bool {
        self.ledger.lock().has_reservation(task_id)
    }

    /// Merge a partial update into the cluster view; absent fields keep their
    /// previous values.
    pub fn update_cluster_resources(&self, update: &ClusterUpdate) {
        self.ledger.lock().apply_cluster_update(update);
    }

    /// Current cluster snapshot.
    #[must_use]
    pub fn cluster_metrics(&self) -> ClusterMetrics {
        self.ledger.lock().cluster().clone()
    }

    /// Ingest an alert reported by a peer node.
    ///
    /// A critical alert marks one node unhealthy (active count floored at
    /// zero) and is rebroadcast as `remote:alert`. Peer-local pressure does
    /// not change this node's own availability accounting.
    pub fn handle_remote_alert(&self, node_id: &str, alert: ResourceAlert) {
        if alert.level == AlertLevel::Critical {
            self.ledger.lock().note_remote_critical();
            warn!(
                node = node_id,
                resource = ?alert.resource,
                "peer reported critical pressure, marking node inactive"
            );
        }
        let _ = self.events.send(ResourceEvent::RemoteAlert {
            node_id: node_id.to_owned(),
            alert,
        });
    }

    /// Local utilization percentages, clamped to `[0, 100]`.
    #[must_use]
    pub fn utilization(&self) -> ResourceUtilization {
        self.ledger.lock().utilization()
    }

    /// Point-in-time copy of local metrics, the cluster view, and the
    /// reservation count. Side-effect free.
    #[must_use]
    pub fn enhanced_metrics(&self) -> EnhancedMetrics {
        let ledger = self.ledger.lock();
        EnhancedMetrics {
            local: ledger.snapshot(),
            cluster: ledger.cluster().clone(),
            reservations: ledger.reservation_count(),
        }
    }

    /// Emit `alert` events for dimensions that crossed into a higher level
    /// since the last check. Dropping back below a threshold resets the
    /// tracked level without emitting.
    fn emit_threshold_alerts(&self) {
        let utilization = self.utilization();
        let mut levels = self.levels.lock();

        let memory_level = classify(
            utilization.memory_percent,
            self.config.memory_warning_percent,
            self.config.memory_critical_percent,
        );
        if let Some(alert) = escalation(
            &mut levels.memory,
            memory_level,
            ResourceKind::Memory,
            utilization.memory_percent,
            self.config.memory_warning_percent,
            self.config.memory_critical_percent,
        ) {
            let _ = self.events.send(ResourceEvent::Alert(alert));
        }

        let cpu_level = classify(
            utilization.cpu_percent,
            self.config.cpu_warning_percent,
            self.config.cpu_critical_percent,
        );
        if let Some(alert) = escalation(
            &mut levels.cpu,
            cpu_level,
            ResourceKind::Cpu,
            utilization.cpu_percent,
            self.config.cpu_warning_percent,
            self.config.cpu_critical_percent,
        ) {
            let _ = self.events.send(ResourceEvent::Alert(alert));
        }
    }
}

/// Map a utilization percentage onto an alert level, if any.
fn classify(value: f64, warning: f64, critical: f64) -> Option<AlertLevel> {
    if value >= critical {
        Some(AlertLevel::Critical)
    } else if value >= warning {
        Some(AlertLevel::Warning)
    } else {
        None
    }
}

/// Update the tracked level and build an alert when the level escalated.
fn escalation(
    tracked: &mut Option<AlertLevel>,
    current: Option<AlertLevel>,
    resource: ResourceKind,
    value: f64,
    warning: f64,
    critical: f64,
) -> Option<ResourceAlert> {
    let escalated = match (*tracked, current) {
        (None, Some(_)) => true,
        (Some(previous), Some(next)) => next > previous,
        _ => false,
    };
    *tracked = current;
    let level = current.filter(|_| escalated)?;
    let threshold = match level {
        AlertLevel::Warning => warning,
        AlertLevel::Critical => critical,
    };
    let noun = match resource {
        ResourceKind::Memory => "memory",
        ResourceKind::Cpu => "cpu",
    };
    Some(ResourceAlert {
        resource,
        level,
        message: format!("{noun} utilization at {value:.1}% (threshold {threshold:.1}%)"),
        value,
        threshold,
        timestamp_ms: now_ms(),
    })
}
