//! # Prometheus Dispatch
//!
//! A resource-aware task scheduler for the Prometheus AI Platform that places
//! work on the local node or on remote peers, whichever has capacity.
//!
//! This library provides a dedicated coordination layer for discrete units of
//! work ("tasks"). Each task declares a resource requirement (memory, CPU, an
//! optional execution timeout), a priority, dependencies on other tasks, and a
//! distribution preference. A recurring scheduling pass admits eligible tasks
//! against a reservation ledger and either runs them locally or dispatches
//! them to a peer through the [`comms::AgentComms`] boundary.
//!
//! ## Core Problem Solved
//!
//! AI agent fleets run heterogeneous workloads against hard resource ceilings:
//!
//! - **Local Limits**: A single node can only host so much concurrent
//!   inference or tooling work before memory pressure kills it
//! - **Cluster Slack**: Peers frequently have headroom the local node lacks,
//!   and work that cannot be admitted locally can still run somewhere
//! - **Leaked Grants**: Reserved capacity that is never released starves the
//!   scheduler; every grant here is time-bounded and reclaimed automatically
//! - **Retry Discipline**: Failed work must requeue without duplicate
//!   execution and without leaving reservations behind
//!
//! ## Key Features
//!
//! - **Admission Control**: A reservation ledger tracks local grants and
//!   cluster-wide availability; admission checks local fit first and falls
//!   back to aggregate cluster capacity
//! - **Time-Bounded Reservations**: Every grant carries an expiry; a
//!   single-fire timer reclaims it if the owner never releases
//! - **Priority Scheduling**: Eligible tasks run highest-priority first with
//!   deterministic submission-order tie-breaking, under a concurrency cap
//! - **Local or Remote Placement**: The execution strategy is decided once at
//!   admission and carried through completion handling
//! - **Retry State Machine**: Failures and timeouts requeue work with a
//!   back-off delay until retries are exhausted
//! - **Lifecycle Events**: Broadcast notifications (`task:added`,
//!   `task:started`, `task:completed`, `task:retry`, `task:failed`,
//!   `task:cancelled`, `alert`, `remote:alert`) for monitoring and callers
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use prometheus_dispatch::builders::build_scheduler;
//! use prometheus_dispatch::comms::memory::StaticComms;
//! use prometheus_dispatch::config::SchedulerConfig;
//! use prometheus_dispatch::core::{FnWork, ResourceRequirement, TaskSpec};
//! use prometheus_dispatch::runtime::TokioSpawner;
//!
//! let spawner = TokioSpawner::current();
//! let comms = Arc::new(StaticComms::new());
//! let (resources, scheduler) =
//!     build_scheduler(SchedulerConfig::default(), comms, spawner)?;
//!
//! scheduler.start();
//! let task_id = scheduler.add_task(
//!     TaskSpec::new(ResourceRequirement::new(512, 1))
//!         .with_priority(10)
//!         .with_work(FnWork::new(|| async { Ok(()) })),
//! );
//! ```
//!
//! For complete examples, see:
//! - `tests/scheduler_test.rs` - Full integration tests
//! - `tests/resource_manager_test.rs` - Reservation and cluster accounting

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling: task model, reservation ledger, resource manager, scheduler.
pub mod core;
/// Configuration models for the scheduler and local resource limits.
pub mod config;
/// Builders to construct a wired scheduler from configuration.
pub mod builders;
/// Agent communication boundary for remote placement and peer messaging.
pub mod comms;
/// Runtime adapters and the spawn abstraction.
pub mod runtime;
/// Shared utilities.
pub mod util;
