//! Core scheduling: task model, events, reservation ledger, resource
//! manager, scheduler, and the single-fire timer abstraction.

pub mod error;
pub mod events;
pub mod ledger;
pub mod resource_manager;
pub mod scheduler;
pub mod task;
pub mod timer;

pub use error::{AppResult, SchedulerError};
pub use events::{AlertLevel, ResourceAlert, ResourceEvent, ResourceKind, TaskEvent};
pub use ledger::{
    ClusterMetrics, ClusterUpdate, LocalResourceSnapshot, Reservation, ReservationScope,
    ResourceLedger, ResourceUtilization,
};
pub use resource_manager::{EnhancedMetrics, ResourceManager};
pub use scheduler::{SchedulerStats, TaskScheduler};
pub use task::{
    DistributionPreference, ExecutionStrategy, FnWork, PeerId, ResourceRequirement, Task, TaskId,
    TaskSpec, TaskStatus, TaskWork,
};
pub use timer::{arm, Spawn, TimerHandle};
