//! Builders to construct a wired scheduler from configuration.

use std::sync::Arc;

use crate::comms::AgentComms;
use crate::config::SchedulerConfig;
use crate::core::resource_manager::ResourceManager;
use crate::core::scheduler::TaskScheduler;
use crate::core::timer::Spawn;
use crate::core::SchedulerError;

/// Validate the configuration and build a resource manager plus a scheduler
/// wired to it.
///
/// The returned scheduler is not started; call `TaskScheduler::start` to
/// begin the pass loop.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidConfig`] when validation fails.
pub fn build_scheduler<S>(
    config: SchedulerConfig,
    comms: Arc<dyn AgentComms>,
    spawner: S,
) -> Result<(Arc<ResourceManager<S>>, Arc<TaskScheduler<S>>), SchedulerError>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    config
        .validate()
        .map_err(SchedulerError::InvalidConfig)?;
    let resources = ResourceManager::new(config.resources.clone(), spawner.clone());
    let scheduler = TaskScheduler::new(config, Arc::clone(&resources), comms, spawner);
    Ok((resources, scheduler))
}
