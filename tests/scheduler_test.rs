//! Integration tests for the task scheduler.
//!
//! These tests validate:
//! 1. Eligible tasks are admitted by the scheduling pass, in priority order
//! 2. Dependencies gate eligibility
//! 3. The concurrency limit is enforced exactly
//! 4. Retry, timeout, and cancellation transitions release reservations
//! 5. Remote placement, status updates, and transport failures
//! 6. Critical resource alerts shed running tasks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prometheus_dispatch::builders::build_scheduler;
use prometheus_dispatch::comms::memory::StaticComms;
use prometheus_dispatch::comms::{MessagePayload, RemoteTaskStatus, TaskStatusUpdate};
use prometheus_dispatch::config::{ResourceConfig, SchedulerConfig};
use prometheus_dispatch::core::{
    DistributionPreference, ExecutionStrategy, ResourceManager, ResourceRequirement,
    SchedulerError, TaskEvent, TaskScheduler, TaskSpec, TaskStatus, TaskWork,
};
use prometheus_dispatch::runtime::TokioSpawner;

type Harness = (
    Arc<ResourceManager<TokioSpawner>>,
    Arc<TaskScheduler<TokioSpawner>>,
);

fn test_config() -> SchedulerConfig {
    SchedulerConfig {
        max_concurrent_tasks: 4,
        default_max_retries: 0,
        retry_delay_ms: 20,
        default_task_timeout_secs: 5,
        scheduling_interval_ms: 25,
        completed_task_retention_secs: None,
        resources: ResourceConfig {
            max_memory_mb: 1024,
            max_cpu_cores: 8,
            ..ResourceConfig::default()
        },
    }
}

fn harness(config: SchedulerConfig, comms: Arc<StaticComms>) -> Harness {
    let spawner = TokioSpawner::current();
    build_scheduler(config, comms, spawner).unwrap()
}

/// Work that counts its executions and succeeds immediately.
#[derive(Clone)]
struct CountingWork {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl TaskWork for CountingWork {
    async fn run(&self) -> anyhow::Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn counting_work(runs: &Arc<AtomicUsize>) -> CountingWork {
    CountingWork {
        runs: Arc::clone(runs),
    }
}

/// Work that sleeps long enough to stay running for the test body.
struct SlowWork {
    duration: Duration,
}

#[async_trait]
impl TaskWork for SlowWork {
    async fn run(&self) -> anyhow::Result<()> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

fn slow_work(duration: Duration) -> SlowWork {
    SlowWork { duration }
}

/// Work that always fails.
struct FailingWork;

#[async_trait]
impl TaskWork for FailingWork {
    async fn run(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("synthetic failure"))
    }
}

fn failing_work() -> FailingWork {
    FailingWork
}

async fn wait_until<F>(timeout_ms: u64, condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn drain_events(events: &mut tokio::sync::broadcast::Receiver<TaskEvent>) -> Vec<TaskEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

#[tokio::test]
async fn test_pass_admits_eligible_task() {
    let (resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let mut events = scheduler.subscribe();
    let runs = Arc::new(AtomicUsize::new(0));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(128, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );
    scheduler.run_scheduling_pass().await;

    assert!(
        wait_until(1_000, || {
            scheduler.task(task_id).unwrap().status == TaskStatus::Completed
        })
        .await
    );
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(resources.enhanced_metrics().reservations, 0);

    // The completion event is emitted just after the status flips; give the
    // spawned run a beat to send it before draining.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let names: Vec<&str> = drain_events(&mut events).iter().map(TaskEvent::name).collect();
    assert_eq!(names, vec!["task:added", "task:started", "task:completed"]);
}

#[tokio::test]
async fn test_loop_schedules_within_interval() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    scheduler.start();

    let runs = Arc::new(AtomicUsize::new(0));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );

    assert!(
        wait_until(1_000, || {
            scheduler.task(task_id).unwrap().status == TaskStatus::Completed
        })
        .await
    );
    scheduler.stop();
}

#[tokio::test]
async fn test_dependency_gates_eligibility() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let runs = Arc::new(AtomicUsize::new(0));

    let first = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_millis(60))),
    );
    let second = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_dependencies(vec![first])
            .with_work(counting_work(&runs)),
    );

    scheduler.run_scheduling_pass().await;
    assert_eq!(scheduler.task(first).unwrap().status, TaskStatus::Running);
    assert_eq!(scheduler.task(second).unwrap().status, TaskStatus::Pending);

    // A direct execution attempt is refused while the dependency is open.
    assert_eq!(
        scheduler.execute_task(second).await,
        Err(SchedulerError::DependenciesUnmet(second))
    );

    assert!(
        wait_until(1_000, || {
            scheduler.task(first).unwrap().status == TaskStatus::Completed
        })
        .await
    );
    scheduler.run_scheduling_pass().await;
    assert!(
        wait_until(1_000, || {
            scheduler.task(second).unwrap().status == TaskStatus::Completed
        })
        .await
    );
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_priority_orders_admission() {
    let mut config = test_config();
    config.max_concurrent_tasks = 1;
    let (_resources, scheduler) = harness(config, Arc::new(StaticComms::new()));

    let low = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_priority(1)
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_millis(100))),
    );
    let high = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_priority(10)
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_millis(100))),
    );

    scheduler.run_scheduling_pass().await;
    assert_eq!(scheduler.task(high).unwrap().status, TaskStatus::Running);
    assert_eq!(scheduler.task(low).unwrap().status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_concurrency_limit_rejects_exactly_one_of_three() {
    let mut config = test_config();
    config.max_concurrent_tasks = 2;
    let (_resources, scheduler) = harness(config, Arc::new(StaticComms::new()));

    let spec = || {
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_millis(80)))
    };
    let a = scheduler.add_task(spec());
    let b = scheduler.add_task(spec());
    let c = scheduler.add_task(spec());

    let results =
        futures::future::join_all([a, b, c].into_iter().map(|id| scheduler.execute_task(id)))
            .await;
    let rejected: Vec<_> = results
        .iter()
        .filter(|result| matches!(result, Err(SchedulerError::AtCapacity { limit: 2 })))
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 2);
    assert!(scheduler.running_count() <= 2);

    // The two admitted tasks run to completion.
    assert!(
        wait_until(1_000, || {
            let done = [a, b, c]
                .iter()
                .filter(|id| scheduler.task(**id).unwrap().status == TaskStatus::Completed)
                .count();
            done == 2
        })
        .await
    );
}

#[tokio::test]
async fn test_retry_until_terminal_failure() {
    let (resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let mut events = scheduler.subscribe();

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_max_retries(2)
            .with_work(failing_work()),
    );

    for _ in 0..40 {
        scheduler.run_scheduling_pass().await;
        if scheduler.task(task_id).unwrap().status == TaskStatus::Failed {
            break;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.retry_count, 2);
    assert!(task.last_error.as_deref().unwrap().contains("synthetic"));
    assert_eq!(resources.enhanced_metrics().reservations, 0);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let drained = drain_events(&mut events);
    let retries = drained
        .iter()
        .filter(|event| event.name() == "task:retry")
        .count();
    let failures = drained
        .iter()
        .filter(|event| event.name() == "task:failed")
        .count();
    assert_eq!(retries, 2);
    assert_eq!(failures, 1);
}

#[tokio::test]
async fn test_retry_waits_for_backoff_delay() {
    let mut config = test_config();
    config.retry_delay_ms = 10_000;
    let (_resources, scheduler) = harness(config, Arc::new(StaticComms::new()));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_max_retries(1)
            .with_work(failing_work()),
    );
    scheduler.run_scheduling_pass().await;
    assert!(
        wait_until(1_000, || {
            scheduler.task(task_id).unwrap().retry_count == 1
        })
        .await
    );

    // The requeued task is not eligible until the delay elapses.
    scheduler.run_scheduling_pass().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(scheduler.task(task_id).unwrap().status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_timeout_fails_task() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1).with_timeout_ms(50))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_secs(30))),
    );
    scheduler.run_scheduling_pass().await;

    assert!(
        wait_until(2_000, || {
            scheduler.task(task_id).unwrap().status == TaskStatus::Failed
        })
        .await
    );
    let task = scheduler.task(task_id).unwrap();
    assert!(task.last_error.as_deref().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_cancel_pending_task_is_idempotent() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(failing_work()),
    );

    assert!(scheduler.cancel_task(task_id).await);
    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.last_error.as_deref(), Some("cancelled"));

    // Cancelling a terminal task is a no-op returning false.
    assert!(!scheduler.cancel_task(task_id).await);
}

#[tokio::test]
async fn test_cancel_running_task_releases_reservation() {
    let (resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(512, 2))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_secs(30))),
    );
    scheduler.execute_task(task_id).await.unwrap();
    assert_eq!(resources.enhanced_metrics().reservations, 1);

    assert!(scheduler.cancel_task(task_id).await);
    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.last_error.as_deref(), Some("cancelled"));
    assert_eq!(scheduler.running_count(), 0);
    assert_eq!(resources.enhanced_metrics().reservations, 0);
    assert_eq!(resources.enhanced_metrics().local.available_memory_mb, 1024);
}

#[tokio::test]
async fn test_remote_dispatch_and_completion() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    let (resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(512, 1))
            .with_preference(DistributionPreference::RemoteOnly)
            .with_payload(serde_json::json!({"model": "m7", "shard": 0})),
    );
    scheduler.run_scheduling_pass().await;

    assert!(wait_until(1_000, || !comms.assignments().is_empty()).await);
    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Running);
    assert_eq!(
        task.strategy,
        Some(ExecutionStrategy::Remote("gpu-1".into()))
    );
    let (peer, descriptor) = comms.assignments().remove(0);
    assert_eq!(peer, "gpu-1");
    assert_eq!(descriptor.task_id, task_id);
    assert_eq!(descriptor.payload["model"], "m7");

    scheduler.handle_remote_status(TaskStatusUpdate {
        task_id,
        status: RemoteTaskStatus::Completed,
        error: None,
    });
    assert_eq!(
        scheduler.task(task_id).unwrap().status,
        TaskStatus::Completed
    );
    assert_eq!(resources.enhanced_metrics().reservations, 0);
}

#[tokio::test]
async fn test_any_preference_prefers_remote() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    let (_resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::Any),
    );
    scheduler.run_scheduling_pass().await;
    assert_eq!(
        scheduler.task(task_id).unwrap().strategy,
        Some(ExecutionStrategy::Remote("gpu-1".into()))
    );
}

#[tokio::test]
async fn test_remote_failure_uses_retry_policy() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    let (_resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(128, 1))
            .with_preference(DistributionPreference::RemoteOnly)
            .with_max_retries(1),
    );
    scheduler.run_scheduling_pass().await;
    assert!(wait_until(1_000, || comms.assignments().len() == 1).await);

    scheduler.handle_remote_status(TaskStatusUpdate {
        task_id,
        status: RemoteTaskStatus::Failed,
        error: Some("peer out of memory".into()),
    });
    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.retry_count, 1);

    tokio::time::sleep(Duration::from_millis(40)).await;
    scheduler.run_scheduling_pass().await;
    assert!(wait_until(1_000, || comms.assignments().len() == 2).await);

    scheduler.handle_remote_status(TaskStatusUpdate {
        task_id,
        status: RemoteTaskStatus::Failed,
        error: Some("peer out of memory".into()),
    });
    let task = scheduler.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Failed);
    assert_eq!(task.last_error.as_deref(), Some("peer out of memory"));
}

#[tokio::test]
async fn test_remote_decline_fails_task() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    comms.decline_assignments(true);
    let (_resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(128, 1))
            .with_preference(DistributionPreference::RemoteOnly),
    );
    scheduler.run_scheduling_pass().await;

    assert!(
        wait_until(1_000, || {
            scheduler.task(task_id).unwrap().status == TaskStatus::Failed
        })
        .await
    );
    assert!(scheduler
        .task(task_id)
        .unwrap()
        .last_error
        .unwrap()
        .contains("declined"));
}

#[tokio::test]
async fn test_transport_error_becomes_task_failure() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    comms.fail_transport(true);
    let (_resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(128, 1))
            .with_preference(DistributionPreference::RemoteOnly),
    );
    scheduler.run_scheduling_pass().await;

    assert!(
        wait_until(1_000, || {
            scheduler.task(task_id).unwrap().status == TaskStatus::Failed
        })
        .await
    );
    // The scheduling pass survives; a fresh local task still runs.
    let runs = Arc::new(AtomicUsize::new(0));
    let local = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );
    scheduler.run_scheduling_pass().await;
    assert!(
        wait_until(1_000, || {
            scheduler.task(local).unwrap().status == TaskStatus::Completed
        })
        .await
    );
}

#[tokio::test]
async fn test_cancel_running_remote_notifies_peer() {
    let comms = Arc::new(StaticComms::new().with_peer("gpu-1", 8192, 16));
    let (_resources, scheduler) = harness(test_config(), Arc::clone(&comms));

    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(128, 1))
            .with_preference(DistributionPreference::RemoteOnly),
    );
    scheduler.run_scheduling_pass().await;
    assert!(wait_until(1_000, || comms.assignments().len() == 1).await);

    assert!(scheduler.cancel_task(task_id).await);
    let messages = comms.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].to, "gpu-1");
    assert_eq!(messages[0].payload, MessagePayload::CancelTask { task_id });

    // A late completion for the cancelled task is ignored.
    scheduler.handle_remote_status(TaskStatusUpdate {
        task_id,
        status: RemoteTaskStatus::Completed,
        error: None,
    });
    assert_eq!(scheduler.task(task_id).unwrap().status, TaskStatus::Failed);
}

#[tokio::test]
async fn test_critical_alert_sheds_running_tasks() {
    let mut config = test_config();
    config.resources = ResourceConfig {
        max_memory_mb: 1000,
        max_cpu_cores: 8,
        memory_warning_percent: 40.0,
        memory_critical_percent: 50.0,
        ..ResourceConfig::default()
    };
    let (resources, scheduler) = harness(config, Arc::new(StaticComms::new()));
    scheduler.start();

    // Reserving 600/1000 MB crosses the 50% critical threshold.
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(600, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_secs(30))),
    );

    assert!(
        wait_until(2_000, || {
            let task = scheduler.task(task_id).unwrap();
            task.status == TaskStatus::Failed && task.last_error.as_deref() == Some("cancelled")
        })
        .await
    );
    assert_eq!(resources.enhanced_metrics().reservations, 0);
    scheduler.stop();
}

#[tokio::test]
async fn test_stop_halts_scheduling_loop() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    scheduler.start();
    scheduler.stop();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let runs = Arc::new(AtomicUsize::new(0));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(scheduler.task(task_id).unwrap().status, TaskStatus::Pending);
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_admission_errors_are_distinct() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));

    let unknown = prometheus_dispatch::core::TaskId::new_v4();
    assert_eq!(
        scheduler.execute_task(unknown).await,
        Err(SchedulerError::TaskNotFound(unknown))
    );

    // Already running.
    let running = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(slow_work(Duration::from_secs(30))),
    );
    scheduler.execute_task(running).await.unwrap();
    assert_eq!(
        scheduler.execute_task(running).await,
        Err(SchedulerError::TaskAlreadyRunning(running))
    );

    // Terminal state.
    assert!(scheduler.cancel_task(running).await);
    assert_eq!(
        scheduler.execute_task(running).await,
        Err(SchedulerError::TaskNotPending {
            id: running,
            status: TaskStatus::Failed
        })
    );
}

#[tokio::test]
async fn test_remote_only_without_peer_stays_pending() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::RemoteOnly),
    );

    scheduler.run_scheduling_pass().await;
    assert_eq!(scheduler.task(task_id).unwrap().status, TaskStatus::Pending);
    assert_eq!(
        scheduler.execute_task(task_id).await,
        Err(SchedulerError::NoPeerAvailable(task_id))
    );
}

#[tokio::test]
async fn test_local_only_oversize_requirement_stays_pending() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(4096, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(failing_work()),
    );

    scheduler.run_scheduling_pass().await;
    assert_eq!(scheduler.task(task_id).unwrap().status, TaskStatus::Pending);
    assert_eq!(
        scheduler.execute_task(task_id).await,
        Err(SchedulerError::ResourceUnavailable(task_id))
    );
}

#[tokio::test]
async fn test_retention_prunes_terminal_records() {
    let mut config = test_config();
    config.completed_task_retention_secs = Some(0);
    let (_resources, scheduler) = harness(config, Arc::new(StaticComms::new()));

    let runs = Arc::new(AtomicUsize::new(0));
    let task_id = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );
    scheduler.run_scheduling_pass().await;
    assert!(
        wait_until(1_000, || {
            scheduler
                .task(task_id)
                .is_some_and(|task| task.status == TaskStatus::Completed)
        })
        .await
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    scheduler.run_scheduling_pass().await;
    assert!(scheduler.task(task_id).is_none());
}

#[tokio::test]
async fn test_stats_snapshot() {
    let (_resources, scheduler) = harness(test_config(), Arc::new(StaticComms::new()));
    let runs = Arc::new(AtomicUsize::new(0));

    let done = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::LocalOnly)
            .with_work(counting_work(&runs)),
    );
    let _pending = scheduler.add_task(
        TaskSpec::new(ResourceRequirement::new(64, 1))
            .with_preference(DistributionPreference::RemoteOnly),
    );
    scheduler.run_scheduling_pass().await;
    assert!(
        wait_until(1_000, || {
            scheduler.task(done).unwrap().status == TaskStatus::Completed
        })
        .await
    );

    let stats = scheduler.stats();
    assert_eq!(stats.submitted, 2);
    assert_eq!(stats.started, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.running, 0);
}
