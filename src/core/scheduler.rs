//! Task scheduler: owns the task set, runs the recurring scheduling pass, and
//! drives each eligible task through admission, placement, execution, and
//! retry.
//!
//! The pass loop is serialized by a re-entrancy guard; task executions and
//! remote dispatches run concurrently with it and synchronize through the
//! same mutex that protects the task map and running set. Critical sections
//! are short and never held across an await.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, oneshot, watch};
use tracing::{debug, info, warn};

use crate::comms::{AgentComms, MessageEnvelope, RemoteTaskStatus, TaskDescriptor, TaskStatusUpdate};
use crate::config::SchedulerConfig;
use crate::core::error::SchedulerError;
use crate::core::events::{AlertLevel, ResourceEvent, TaskEvent};
use crate::core::resource_manager::ResourceManager;
use crate::core::task::{
    DistributionPreference, ExecutionStrategy, PeerId, ResourceRequirement, Task, TaskId, TaskSpec,
    TaskStatus, TaskWork,
};
use crate::core::timer::Spawn;
use crate::util::clock::now_ms;

/// A task currently in the running set.
struct RunningEntry {
    /// Placement decided at admission.
    strategy: ExecutionStrategy,
    /// Cooperative cancel signal for local runs; `None` for remote runs,
    /// which are cancelled with a peer message instead.
    cancel: Option<oneshot::Sender<()>>,
}

/// State owned exclusively by the scheduler and mutated only through its
/// operations.
#[derive(Default)]
struct SchedulerState {
    tasks: HashMap<TaskId, Task>,
    works: HashMap<TaskId, Arc<dyn TaskWork>>,
    running: HashMap<TaskId, RunningEntry>,
    next_sequence: u64,
}

/// Lifetime counters, updated lock-free.
#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    retried: AtomicU64,
    cancelled: AtomicU64,
}

/// Snapshot of scheduler activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Tasks ever submitted.
    pub submitted: u64,
    /// Runs started (retries count again).
    pub started: u64,
    /// Tasks completed successfully.
    pub completed: u64,
    /// Tasks failed terminally.
    pub failed: u64,
    /// Retry requeues performed.
    pub retried: u64,
    /// Tasks cancelled.
    pub cancelled: u64,
    /// Tasks currently running.
    pub running: usize,
    /// Tasks currently pending.
    pub pending: usize,
}

/// What `execute_task` has to launch after a successful admission commit.
enum Launch {
    Local {
        work: Option<Arc<dyn TaskWork>>,
        cancel: oneshot::Receiver<()>,
    },
    Remote {
        descriptor: TaskDescriptor,
        peer: PeerId,
    },
}

/// Result of the failure transition under the state lock.
enum FailureOutcome {
    Retry(u32),
    Terminal,
    Ignored,
}

/// Priority/dependency scheduler with resource admission and local/remote
/// placement.
pub struct TaskScheduler<S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    config: SchedulerConfig,
    resources: Arc<ResourceManager<S>>,
    comms: Arc<dyn AgentComms>,
    spawner: S,
    state: Mutex<SchedulerState>,
    /// Serializes scheduling passes; at most one pass is ever in flight.
    pass_active: AtomicBool,
    loop_started: AtomicBool,
    shutdown: watch::Sender<bool>,
    events: broadcast::Sender<TaskEvent>,
    counters: Counters,
    /// Handle to ourselves for spawned runs; never keeps the scheduler alive.
    weak_self: Weak<Self>,
}

impl<S> TaskScheduler<S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Create a scheduler. Call [`TaskScheduler::start`] to begin the pass
    /// loop, or drive passes manually with
    /// [`TaskScheduler::run_scheduling_pass`].
    pub fn new(
        config: SchedulerConfig,
        resources: Arc<ResourceManager<S>>,
        comms: Arc<dyn AgentComms>,
        spawner: S,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        let (shutdown, _) = watch::channel(false);
        Arc::new_cyclic(|weak| Self {
            config,
            resources,
            comms,
            spawner,
            state: Mutex::new(SchedulerState::default()),
            pass_active: AtomicBool::new(false),
            loop_started: AtomicBool::new(false),
            shutdown,
            events,
            counters: Counters::default(),
            weak_self: weak.clone(),
        })
    }

    /// Subscribe to task lifecycle notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.events.subscribe()
    }

    /// The resource manager this scheduler admits against.
    #[must_use]
    pub const fn resources(&self) -> &Arc<ResourceManager<S>> {
        &self.resources
    }

    /// Submit a task. It enters the set as pending and is picked up by the
    /// next scheduling pass once eligible.
    pub fn add_task(&self, spec: TaskSpec) -> TaskId {
        let task_id = TaskId::new_v4();
        let now = now_ms();
        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            if let Some(work) = spec.work {
                state.works.insert(task_id, work);
            }
            state.tasks.insert(
                task_id,
                Task {
                    id: task_id,
                    sequence,
                    priority: spec.priority,
                    requirement: spec.requirement,
                    dependencies: spec.dependencies,
                    preference: spec.preference,
                    status: TaskStatus::Pending,
                    retry_count: 0,
                    max_retries: spec.max_retries.unwrap_or(self.config.default_max_retries),
                    created_at_ms: now,
                    started_at_ms: None,
                    completed_at_ms: None,
                    eligible_at_ms: now,
                    last_error: None,
                    strategy: None,
                    payload: spec.payload,
                },
            );
        }
        self.counters.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(task_id = %task_id, "task added");
        self.emit(TaskEvent::Added { task_id });
        task_id
    }

    /// Snapshot of a task record.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<Task> {
        self.state.lock().tasks.get(&task_id).cloned()
    }

    /// Number of currently running tasks.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.state.lock().running.len()
    }

    /// Snapshot of lifetime counters and current set sizes.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        let (running, pending) = {
            let guard = self.state.lock();
            let pending = guard
                .tasks
                .values()
                .filter(|task| task.status == TaskStatus::Pending)
                .count();
            (guard.running.len(), pending)
        };
        SchedulerStats {
            submitted: self.counters.submitted.load(Ordering::Relaxed),
            started: self.counters.started.load(Ordering::Relaxed),
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            retried: self.counters.retried.load(Ordering::Relaxed),
            cancelled: self.counters.cancelled.load(Ordering::Relaxed),
            running,
            pending,
        }
    }

    /// Start the recurring scheduling loop. Idempotent.
    ///
    /// The loop ticks at the configured interval, reacts to critical resource
    /// alerts by shedding running tasks, and exits on [`TaskScheduler::stop`].
    pub fn start(&self) {
        if self.loop_started.swap(true, Ordering::AcqRel) {
            return;
        }
        let Some(scheduler) = self.weak_self.upgrade() else {
            return;
        };
        let mut shutdown = self.shutdown.subscribe();
        let mut resource_events = self.resources.subscribe();
        let interval = self.config.scheduling_interval();
        self.spawner.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut alerts_open = true;
            info!(interval_ms = interval.as_millis() as u64, "scheduling loop started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => scheduler.run_scheduling_pass().await,
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("scheduling loop stopped");
                            break;
                        }
                    }
                    event = resource_events.recv(), if alerts_open => match event {
                        Ok(ResourceEvent::Alert(alert)) if alert.level == AlertLevel::Critical => {
                            warn!(
                                resource = ?alert.resource,
                                value = alert.value,
                                "critical resource alert, shedding running tasks"
                            );
                            scheduler.shed_running_tasks().await;
                        }
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "resource event stream lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => alerts_open = false,
                    },
                }
            }
        });
    }

    /// Halt the scheduling loop. In-flight tasks keep running to completion.
    pub fn stop(&self) {
        info!("scheduler stop requested");
        let _ = self.shutdown.send(true);
    }

    /// Run one scheduling pass: prune retained records, then admit eligible
    /// tasks in priority order while capacity lasts.
    ///
    /// Re-entrancy guarded; a pass that finds another pass in flight returns
    /// immediately.
    pub async fn run_scheduling_pass(&self) {
        if self.pass_active.swap(true, Ordering::AcqRel) {
            debug!("scheduling pass already in flight, skipping");
            return;
        }
        self.prune_retained_records();
        for task_id in self.eligible_tasks() {
            if self.running_count() >= self.config.max_concurrent_tasks {
                break;
            }
            match self.execute_task(task_id).await {
                Ok(()) => {}
                Err(
                    SchedulerError::ResourceUnavailable(_) | SchedulerError::NoPeerAvailable(_),
                ) => {
                    // Stays pending; capacity may free up before the next pass.
                    debug!(task_id = %task_id, "task not admitted this pass");
                }
                Err(SchedulerError::AtCapacity { .. }) => break,
                Err(error) => {
                    debug!(task_id = %task_id, error = %error, "task skipped this pass");
                }
            }
        }
        self.pass_active.store(false, Ordering::Release);
    }

    /// Admit and launch one task.
    ///
    /// Surfaces each admission failure as a distinct error: unknown task,
    /// already running, terminal state, unmet dependencies, saturated
    /// concurrency limit, no peer, or insufficient resources. Reservation
    /// failure after a passing advisory check is an expected race; the task
    /// simply stays pending.
    pub async fn execute_task(&self, task_id: TaskId) -> Result<(), SchedulerError> {
        let limit = self.config.max_concurrent_tasks;

        // Admission snapshot; nothing is mutated yet.
        let (requirement, preference) = {
            let guard = self.state.lock();
            let task = guard
                .tasks
                .get(&task_id)
                .ok_or(SchedulerError::TaskNotFound(task_id))?;
            if task.status == TaskStatus::Running || guard.running.contains_key(&task_id) {
                return Err(SchedulerError::TaskAlreadyRunning(task_id));
            }
            if task.status != TaskStatus::Pending {
                return Err(SchedulerError::TaskNotPending {
                    id: task_id,
                    status: task.status,
                });
            }
            if guard.running.len() >= limit {
                return Err(SchedulerError::AtCapacity { limit });
            }
            if !dependencies_completed(&guard.tasks, &task.dependencies) {
                return Err(SchedulerError::DependenciesUnmet(task_id));
            }
            (task.requirement.clone(), task.preference)
        };

        let strategy = self
            .decide_strategy(task_id, &requirement, preference)
            .await?;

        // The advisory checks above can race other admissions; the
        // reservation re-check is authoritative.
        if !self.resources.reserve_resources(task_id, &requirement) {
            return Err(SchedulerError::ResourceUnavailable(task_id));
        }

        // Commit under the lock, re-validating what may have changed while
        // the strategy decision and reservation ran unlocked.
        let launch = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if state.running.len() >= limit {
                Err(SchedulerError::AtCapacity { limit })
            } else {
                match state.tasks.get_mut(&task_id) {
                    None => Err(SchedulerError::TaskNotFound(task_id)),
                    Some(task) if task.status == TaskStatus::Running => {
                        Err(SchedulerError::TaskAlreadyRunning(task_id))
                    }
                    Some(task) if task.status != TaskStatus::Pending => {
                        Err(SchedulerError::TaskNotPending {
                            id: task_id,
                            status: task.status,
                        })
                    }
                    Some(task) => {
                        task.status = TaskStatus::Running;
                        task.started_at_ms = Some(now_ms());
                        task.strategy = Some(strategy.clone());
                        let (cancel, launch) = match &strategy {
                            ExecutionStrategy::Local => {
                                let (tx, rx) = oneshot::channel();
                                let work = state.works.get(&task_id).cloned();
                                (Some(tx), Launch::Local { work, cancel: rx })
                            }
                            ExecutionStrategy::Remote(peer) => (
                                None,
                                Launch::Remote {
                                    descriptor: TaskDescriptor::from_task(task),
                                    peer: peer.clone(),
                                },
                            ),
                        };
                        state.running.insert(
                            task_id,
                            RunningEntry {
                                strategy: strategy.clone(),
                                cancel,
                            },
                        );
                        Ok(launch)
                    }
                }
            }
        };

        let launch = match launch {
            Ok(launch) => launch,
            Err(error) => {
                self.resources.release_resources(task_id);
                return Err(error);
            }
        };

        self.counters.started.fetch_add(1, Ordering::Relaxed);
        info!(task_id = %task_id, strategy = %strategy, "task started");
        self.emit(TaskEvent::Started {
            task_id,
            strategy: strategy.clone(),
        });

        match launch {
            Launch::Local { work, cancel } => {
                let timeout = requirement
                    .timeout()
                    .unwrap_or_else(|| self.config.task_timeout());
                self.spawn_local_run(task_id, work, cancel, timeout);
            }
            Launch::Remote { descriptor, peer } => {
                self.spawn_remote_dispatch(task_id, descriptor, peer);
            }
        }
        Ok(())
    }

    /// Apply a `task:status:updated` notification from a peer. Updates may
    /// arrive in any order; each is resolved independently by task id, and
    /// updates for tasks no longer running are ignored.
    pub fn handle_remote_status(&self, update: TaskStatusUpdate) {
        debug!(task_id = %update.task_id, status = ?update.status, "remote status update");
        match update.status {
            RemoteTaskStatus::Completed => self.finish_success(update.task_id),
            RemoteTaskStatus::Failed => self.finish_failure(
                update.task_id,
                update
                    .error
                    .unwrap_or_else(|| "remote execution failed".to_owned()),
            ),
        }
    }

    /// Cancel a task.
    ///
    /// Pending tasks fail immediately with error "cancelled"; running tasks
    /// additionally leave the running set, release their reservation, and —
    /// when remote — notify the assigned peer. Idempotent: returns false for
    /// unknown or already-terminal tasks.
    pub async fn cancel_task(&self, task_id: TaskId) -> bool {
        let entry = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let Some(task) = state.tasks.get_mut(&task_id) else {
                return false;
            };
            if task.status.is_terminal() {
                return false;
            }
            let was_running = task.status == TaskStatus::Running;
            task.status = TaskStatus::Failed;
            task.last_error = Some("cancelled".to_owned());
            task.completed_at_ms = Some(now_ms());
            state.works.remove(&task_id);
            if was_running {
                state.running.remove(&task_id)
            } else {
                None
            }
        };

        if let Some(entry) = entry {
            if let Some(cancel) = entry.cancel {
                let _ = cancel.send(());
            }
            if let ExecutionStrategy::Remote(peer) = &entry.strategy {
                let envelope = MessageEnvelope::cancel_task(peer.clone(), task_id);
                if let Err(error) = self.comms.send_message(envelope).await {
                    warn!(
                        task_id = %task_id,
                        peer = %peer,
                        error = %error,
                        "failed to notify peer of cancellation"
                    );
                }
            }
            self.resources.release_resources(task_id);
        }

        self.counters.cancelled.fetch_add(1, Ordering::Relaxed);
        info!(task_id = %task_id, "task cancelled");
        self.emit(TaskEvent::Cancelled { task_id });
        true
    }

    /// Cancel every currently running task. The blunt response to a critical
    /// resource alert; individual cancellation failures are logged only.
    pub async fn shed_running_tasks(&self) {
        let running: Vec<TaskId> = self.state.lock().running.keys().copied().collect();
        for task_id in running {
            if !self.cancel_task(task_id).await {
                debug!(task_id = %task_id, "task finished before shed cancellation");
            }
        }
    }

    /// Pick the placement for one admission.
    async fn decide_strategy(
        &self,
        task_id: TaskId,
        requirement: &ResourceRequirement,
        preference: DistributionPreference,
    ) -> Result<ExecutionStrategy, SchedulerError> {
        match preference {
            DistributionPreference::LocalOnly => {
                if self.resources.can_handle_locally(requirement) {
                    Ok(ExecutionStrategy::Local)
                } else {
                    Err(SchedulerError::ResourceUnavailable(task_id))
                }
            }
            DistributionPreference::RemoteOnly => self
                .comms
                .find_best_node_for_task(requirement)
                .await
                .map(ExecutionStrategy::Remote)
                .ok_or(SchedulerError::NoPeerAvailable(task_id)),
            DistributionPreference::Any => {
                if let Some(peer) = self.comms.find_best_node_for_task(requirement).await {
                    Ok(ExecutionStrategy::Remote(peer))
                } else if self.resources.can_handle_locally(requirement) {
                    Ok(ExecutionStrategy::Local)
                } else {
                    Err(SchedulerError::ResourceUnavailable(task_id))
                }
            }
        }
    }

    /// Race the caller-supplied work against the deadline and a cooperative
    /// cancel signal. Whichever resolves first owns the outcome; the losers
    /// cannot affect state afterwards because the finish paths re-validate
    /// that the task is still running.
    fn spawn_local_run(
        &self,
        task_id: TaskId,
        work: Option<Arc<dyn TaskWork>>,
        mut cancel: oneshot::Receiver<()>,
        timeout: Duration,
    ) {
        let Some(scheduler) = self.weak_self.upgrade() else {
            return;
        };
        self.spawner.spawn(async move {
            let Some(work) = work else {
                scheduler.finish_failure(task_id, "task has no local work attached".to_owned());
                return;
            };
            tokio::select! {
                _ = &mut cancel => {
                    // Cancellation already transitioned the task; the work is
                    // abandoned and any late result discarded.
                    debug!(task_id = %task_id, "local run abandoned after cancel");
                }
                outcome = tokio::time::timeout(timeout, work.run()) => match outcome {
                    Ok(Ok(())) => scheduler.finish_success(task_id),
                    Ok(Err(error)) => scheduler.finish_failure(task_id, error.to_string()),
                    Err(_) => scheduler.finish_failure(
                        task_id,
                        format!("execution timed out after {}ms", timeout.as_millis()),
                    ),
                },
            }
        });
    }

    /// Hand a task to the assigned peer. Rejection and transport errors are
    /// execution failures for this task only; completion arrives later via
    /// [`TaskScheduler::handle_remote_status`].
    fn spawn_remote_dispatch(&self, task_id: TaskId, descriptor: TaskDescriptor, peer: PeerId) {
        let Some(scheduler) = self.weak_self.upgrade() else {
            return;
        };
        self.spawner.spawn(async move {
            match scheduler.comms.assign_task(&descriptor, &peer).await {
                Ok(true) => {
                    debug!(task_id = %task_id, peer = %peer, "task accepted by peer");
                }
                Ok(false) => {
                    scheduler.finish_failure(task_id, format!("peer {peer} declined task"));
                }
                Err(error) => {
                    scheduler.finish_failure(task_id, format!("dispatch to {peer} failed: {error}"));
                }
            }
        });
    }

    /// Success transition: only applies while the task is still running.
    fn finish_success(&self, task_id: TaskId) {
        let finished = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            match state.tasks.get_mut(&task_id) {
                Some(task) if task.status == TaskStatus::Running => {
                    task.status = TaskStatus::Completed;
                    task.completed_at_ms = Some(now_ms());
                    state.running.remove(&task_id);
                    state.works.remove(&task_id);
                    true
                }
                _ => false,
            }
        };
        if !finished {
            debug!(task_id = %task_id, "ignoring completion for task no longer running");
            return;
        }
        self.resources.release_resources(task_id);
        self.counters.completed.fetch_add(1, Ordering::Relaxed);
        info!(task_id = %task_id, "task completed");
        self.emit(TaskEvent::Completed { task_id });
    }

    /// Failure transition: requeue with back-off while retries remain,
    /// otherwise fail terminally. Only applies while the task is running.
    fn finish_failure(&self, task_id: TaskId, error: String) {
        let outcome = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            match state.tasks.get_mut(&task_id) {
                Some(task) if task.status == TaskStatus::Running => {
                    state.running.remove(&task_id);
                    if task.retry_count < task.max_retries {
                        task.retry_count += 1;
                        task.status = TaskStatus::Pending;
                        task.strategy = None;
                        task.eligible_at_ms = now_ms() + u128::from(self.config.retry_delay_ms);
                        task.last_error = Some(error.clone());
                        FailureOutcome::Retry(task.retry_count)
                    } else {
                        task.status = TaskStatus::Failed;
                        task.completed_at_ms = Some(now_ms());
                        task.last_error = Some(error.clone());
                        state.works.remove(&task_id);
                        FailureOutcome::Terminal
                    }
                }
                _ => FailureOutcome::Ignored,
            }
        };
        match outcome {
            FailureOutcome::Ignored => {
                debug!(task_id = %task_id, "ignoring failure for task no longer running");
            }
            FailureOutcome::Retry(attempt) => {
                self.resources.release_resources(task_id);
                self.counters.retried.fetch_add(1, Ordering::Relaxed);
                warn!(task_id = %task_id, attempt, error = %error, "task failed, requeued");
                self.emit(TaskEvent::Retry { task_id, attempt });
            }
            FailureOutcome::Terminal => {
                self.resources.release_resources(task_id);
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(task_id = %task_id, error = %error, "task failed terminally");
                self.emit(TaskEvent::Failed { task_id, error });
            }
        }
    }

    /// Pending tasks whose dependencies are complete and whose retry back-off
    /// has elapsed, highest priority first, submission order as tie-break.
    fn eligible_tasks(&self) -> Vec<TaskId> {
        let now = now_ms();
        let guard = self.state.lock();
        let mut eligible: Vec<(i32, u64, TaskId)> = guard
            .tasks
            .values()
            .filter(|task| {
                task.status == TaskStatus::Pending
                    && task.eligible_at_ms <= now
                    && dependencies_completed(&guard.tasks, &task.dependencies)
            })
            .map(|task| (task.priority, task.sequence, task.id))
            .collect();
        eligible.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        eligible.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Drop terminal task records older than the configured retention window.
    /// Records still referenced as dependencies of live tasks are kept so
    /// dependents can become eligible.
    fn prune_retained_records(&self) {
        let Some(retention) = self.config.completed_task_retention() else {
            return;
        };
        let cutoff = now_ms().saturating_sub(retention.as_millis());
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let referenced: HashSet<TaskId> = state
            .tasks
            .values()
            .filter(|task| !task.status.is_terminal())
            .flat_map(|task| task.dependencies.iter().copied())
            .collect();
        state.tasks.retain(|id, task| {
            if !task.status.is_terminal() || referenced.contains(id) {
                return true;
            }
            !matches!(task.completed_at_ms, Some(done) if done <= cutoff)
        });
    }

    fn emit(&self, event: TaskEvent) {
        let _ = self.events.send(event);
    }
}

/// True when every dependency exists and has completed.
fn dependencies_completed(tasks: &HashMap<TaskId, Task>, dependencies: &[TaskId]) -> bool {
    dependencies
        .iter()
        .all(|dep| tasks.get(dep).is_some_and(|task| task.status == TaskStatus::Completed))
}
