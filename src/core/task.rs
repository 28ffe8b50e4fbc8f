//! Task model: identifiers, resource requirements, lifecycle state, and the
//! caller-supplied work abstraction.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::AppResult;

/// Unique task identifier.
pub type TaskId = Uuid;

/// Identifier of a remote peer node.
pub type PeerId = String;

/// Resources a task needs in order to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    /// Memory the task needs, in megabytes.
    pub memory_mb: u64,
    /// CPU cores the task needs.
    pub cpu_cores: u32,
    /// Execution/reservation timeout in milliseconds; falls back to the
    /// scheduler defaults when absent.
    pub timeout_ms: Option<u64>,
}

impl ResourceRequirement {
    /// Create a requirement with no timeout override.
    #[must_use]
    pub const fn new(memory_mb: u64, cpu_cores: u32) -> Self {
        Self {
            memory_mb,
            cpu_cores,
            timeout_ms: None,
        }
    }

    /// Set the timeout override.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// True when the requirement asks for no resources at all. Zero-cost
    /// requirements are always admissible.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.memory_mb == 0 && self.cpu_cores == 0
    }

    /// Timeout override as a [`Duration`], if present.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Where a task may be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionPreference {
    /// Only run on the local node.
    LocalOnly,
    /// Only dispatch to a remote peer.
    RemoteOnly,
    /// Prefer a remote peer, fall back to local capacity.
    #[default]
    Any,
}

/// Placement decision for one admission, decided once and carried through to
/// completion handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run on the local node.
    Local,
    /// Dispatch to the named peer.
    Remote(PeerId),
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote(peer) => write!(f, "remote:{peer}"),
        }
    }
}

/// Status of a task in the scheduler lifecycle.
///
/// Transitions move forward only (`Pending -> Running -> Completed | Failed`),
/// with the single exception of `Running -> Pending` when a failed run has
/// retries remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting to be admitted.
    Pending,
    /// Admitted and executing, locally or remotely.
    Running,
    /// Finished successfully. Terminal.
    Completed,
    /// Failed, cancelled, or exhausted its retries. Terminal.
    Failed,
}

impl TaskStatus {
    /// True for the two terminal states.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A unit of work tracked by the scheduler.
///
/// Mutated only by the scheduler; callers observe snapshots via
/// `TaskScheduler::task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Submission order, used as the deterministic priority tie-break.
    pub sequence: u64,
    /// Ordering key; higher runs first.
    pub priority: i32,
    /// Resources the task needs.
    pub requirement: ResourceRequirement,
    /// Tasks that must complete before this one becomes eligible.
    pub dependencies: Vec<TaskId>,
    /// Placement preference.
    pub preference: DistributionPreference,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Failed attempts so far.
    pub retry_count: u32,
    /// Attempts allowed before the task fails terminally.
    pub max_retries: u32,
    /// Submission time, milliseconds since epoch.
    pub created_at_ms: u128,
    /// Start of the most recent run, if any.
    pub started_at_ms: Option<u128>,
    /// Time the task reached a terminal state, if it has.
    pub completed_at_ms: Option<u128>,
    /// Earliest time the task is eligible again; set by the retry back-off.
    pub eligible_at_ms: u128,
    /// Most recent error, retained across retries and on terminal failure.
    pub last_error: Option<String>,
    /// Executor assigned at admission; `None` until the task first runs.
    pub strategy: Option<ExecutionStrategy>,
    /// Opaque payload forwarded to peers on remote dispatch.
    pub payload: serde_json::Value,
}

/// Caller-supplied unit of computation.
///
/// The scheduler only observes success, failure, or timeout; it never
/// inspects the operation's internals. Work has no mandatory cancellation
/// hook: a cancelled local run is abandoned and its eventual result
/// discarded.
#[async_trait]
pub trait TaskWork: Send + Sync {
    /// Run the work to completion.
    async fn run(&self) -> AppResult<()>;
}

/// Adapter turning an async closure into a [`TaskWork`].
pub struct FnWork<F> {
    f: F,
}

impl<F> FnWork<F> {
    /// Wrap a closure producing the work future.
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> TaskWork for FnWork<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = AppResult<()>> + Send,
{
    async fn run(&self) -> AppResult<()> {
        (self.f)().await
    }
}

/// Caller-facing task submission.
///
/// Built with the `with_*` methods and handed to `TaskScheduler::add_task`.
pub struct TaskSpec {
    /// Ordering key; higher runs first.
    pub priority: i32,
    /// Resources the task needs.
    pub requirement: ResourceRequirement,
    /// Tasks that must complete before this one becomes eligible.
    pub dependencies: Vec<TaskId>,
    /// Placement preference.
    pub preference: DistributionPreference,
    /// Override for the scheduler's default retry budget.
    pub max_retries: Option<u32>,
    /// Opaque payload forwarded to peers on remote dispatch.
    pub payload: serde_json::Value,
    /// Local executable work; required for tasks that may run locally.
    pub work: Option<Arc<dyn TaskWork>>,
}

impl TaskSpec {
    /// Create a spec with the given requirement and defaults for the rest.
    #[must_use]
    pub fn new(requirement: ResourceRequirement) -> Self {
        Self {
            priority: 0,
            requirement,
            dependencies: Vec::new(),
            preference: DistributionPreference::default(),
            max_retries: None,
            payload: serde_json::Value::Null,
            work: None,
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Declare dependencies on other tasks.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<TaskId>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set the placement preference.
    #[must_use]
    pub const fn with_preference(mut self, preference: DistributionPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Override the retry budget for this task.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Attach an opaque payload for remote dispatch.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Attach the local executable work.
    #[must_use]
    pub fn with_work<W>(mut self, work: W) -> Self
    where
        W: TaskWork + 'static,
    {
        self.work = Some(Arc::new(work));
        self
    }
}

impl fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpec")
            .field("priority", &self.priority)
            .field("requirement", &self.requirement)
            .field("dependencies", &self.dependencies)
            .field("preference", &self.preference)
            .field("max_retries", &self.max_retries)
            .field("has_work", &self.work.is_some())
            .finish()
    }
}
