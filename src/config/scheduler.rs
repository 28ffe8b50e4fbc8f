//! Scheduler and resource-limit configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Local resource limits and alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Maximum memory the node grants to tasks, megabytes.
    pub max_memory_mb: u64,
    /// Maximum CPU cores the node grants to tasks.
    pub max_cpu_cores: u32,
    /// Memory utilization percentage that emits a warning alert.
    pub memory_warning_percent: f64,
    /// Memory utilization percentage that emits a critical alert.
    pub memory_critical_percent: f64,
    /// CPU utilization percentage that emits a warning alert.
    pub cpu_warning_percent: f64,
    /// CPU utilization percentage that emits a critical alert.
    pub cpu_critical_percent: f64,
    /// Default reservation lifetime in seconds when a requirement carries no
    /// timeout of its own.
    pub reservation_timeout_secs: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: 8192,
            max_cpu_cores: u32::try_from(num_cpus::get()).unwrap_or(u32::MAX),
            memory_warning_percent: 75.0,
            memory_critical_percent: 90.0,
            cpu_warning_percent: 75.0,
            cpu_critical_percent: 90.0,
            reservation_timeout_secs: 60,
        }
    }
}

impl ResourceConfig {
    /// Default reservation lifetime as a [`Duration`].
    #[must_use]
    pub const fn reservation_timeout(&self) -> Duration {
        Duration::from_secs(self.reservation_timeout_secs)
    }

    /// Validate resource configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_memory_mb == 0 {
            return Err("max_memory_mb must be greater than 0".into());
        }
        if self.max_cpu_cores == 0 {
            return Err("max_cpu_cores must be greater than 0".into());
        }
        if self.reservation_timeout_secs == 0 {
            return Err("reservation_timeout_secs must be greater than 0".into());
        }
        for (name, warning, critical) in [
            (
                "memory",
                self.memory_warning_percent,
                self.memory_critical_percent,
            ),
            ("cpu", self.cpu_warning_percent, self.cpu_critical_percent),
        ] {
            if !(0.0..=100.0).contains(&warning) || !(0.0..=100.0).contains(&critical) {
                return Err(format!("{name} thresholds must be within 0..=100"));
            }
            if warning >= critical {
                return Err(format!(
                    "{name} warning threshold must be below the critical threshold"
                ));
            }
        }
        Ok(())
    }
}

/// Root scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum simultaneously running tasks.
    pub max_concurrent_tasks: usize,
    /// Retry budget applied when a task spec carries no override.
    pub default_max_retries: u32,
    /// Delay before a failed task becomes eligible again, milliseconds.
    pub retry_delay_ms: u64,
    /// Default execution timeout for local runs, seconds.
    pub default_task_timeout_secs: u64,
    /// Interval between scheduling passes, milliseconds.
    pub scheduling_interval_ms: u64,
    /// Retention window for terminal task records, seconds; `None` keeps
    /// records until the process stops.
    pub completed_task_retention_secs: Option<u64>,
    /// Local resource limits and thresholds.
    pub resources: ResourceConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: num_cpus::get(),
            default_max_retries: 3,
            retry_delay_ms: 1_000,
            default_task_timeout_secs: 60,
            scheduling_interval_ms: 500,
            completed_task_retention_secs: None,
            resources: ResourceConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Default local execution timeout as a [`Duration`].
    #[must_use]
    pub const fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.default_task_timeout_secs)
    }

    /// Scheduling pass interval as a [`Duration`].
    #[must_use]
    pub const fn scheduling_interval(&self) -> Duration {
        Duration::from_millis(self.scheduling_interval_ms)
    }

    /// Terminal record retention as a [`Duration`], if configured.
    #[must_use]
    pub fn completed_task_retention(&self) -> Option<Duration> {
        self.completed_task_retention_secs.map(Duration::from_secs)
    }

    /// Validate configuration values, including the resource section.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_tasks == 0 {
            return Err("max_concurrent_tasks must be greater than 0".into());
        }
        if self.default_task_timeout_secs == 0 {
            return Err("default_task_timeout_secs must be greater than 0".into());
        }
        if self.scheduling_interval_ms == 0 {
            return Err("scheduling_interval_ms must be greater than 0".into());
        }
        self.resources
            .validate()
            .map_err(|e| format!("resources invalid: {e}"))
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build a configuration from defaults plus `DISPATCH_*` environment
    /// overrides, loading a `.env` file first when one is present.
    ///
    /// Recognized variables: `DISPATCH_MAX_CONCURRENT_TASKS`,
    /// `DISPATCH_DEFAULT_MAX_RETRIES`, `DISPATCH_RETRY_DELAY_MS`,
    /// `DISPATCH_TASK_TIMEOUT_SECS`, `DISPATCH_SCHEDULING_INTERVAL_MS`,
    /// `DISPATCH_MAX_MEMORY_MB`, `DISPATCH_MAX_CPU_CORES`,
    /// `DISPATCH_RESERVATION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        let mut cfg = Self::default();
        if let Some(value) = env_parse("DISPATCH_MAX_CONCURRENT_TASKS")? {
            cfg.max_concurrent_tasks = value;
        }
        if let Some(value) = env_parse("DISPATCH_DEFAULT_MAX_RETRIES")? {
            cfg.default_max_retries = value;
        }
        if let Some(value) = env_parse("DISPATCH_RETRY_DELAY_MS")? {
            cfg.retry_delay_ms = value;
        }
        if let Some(value) = env_parse("DISPATCH_TASK_TIMEOUT_SECS")? {
            cfg.default_task_timeout_secs = value;
        }
        if let Some(value) = env_parse("DISPATCH_SCHEDULING_INTERVAL_MS")? {
            cfg.scheduling_interval_ms = value;
        }
        if let Some(value) = env_parse("DISPATCH_MAX_MEMORY_MB")? {
            cfg.resources.max_memory_mb = value;
        }
        if let Some(value) = env_parse("DISPATCH_MAX_CPU_CORES")? {
            cfg.resources.max_cpu_cores = value;
        }
        if let Some(value) = env_parse("DISPATCH_RESERVATION_TIMEOUT_SECS")? {
            cfg.resources.reservation_timeout_secs = value;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Read and parse one environment variable, absent meaning "keep default".
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, String> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
