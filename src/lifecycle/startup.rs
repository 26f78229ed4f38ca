//! Startup orchestration.
//!
//! # Responsibilities
//! - Register the host capability provider
//! - Construct the reachability monitor, error reporter and retry executor
//! - Install the process-wide fault observer
//! - Start and stop the background reachability loop
//!
//! # Design Decisions
//! - Fail fast: configuration is validated before anything is built
//! - Subsystems initialize in order, not concurrently
//! - The monitor loop starts only on `start()`, so construction has no side
//!   effects on the runtime

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::capability;
use crate::config::{validate_config, AppConfig, ConfigError};
use crate::lifecycle::shutdown::Shutdown;
use crate::reachability::{MonitorSettings, NoSignal, ReachabilityMonitor, ReachabilitySource, TcpProbe};
use crate::reporting::{detach_fault_observer, install_fault_observer, ErrorReporter};
use crate::resilience::{RetryExecutor, RetryPolicy};

/// Every long-lived component, wired together.
#[derive(Debug)]
pub struct AppRuntime {
    config: AppConfig,
    reporter: Arc<ErrorReporter>,
    reachability: ReachabilityMonitor,
    retry: RetryExecutor,
    shutdown: Shutdown,
    monitor_task: Option<JoinHandle<()>>,
}

impl AppRuntime {
    /// Build the runtime with the source named by the configuration.
    pub fn bootstrap(config: AppConfig) -> Result<Self, ConfigError> {
        let source = source_for(&config);
        Self::bootstrap_with_source(config, source)
    }

    /// Build the runtime around an explicit reachability source.
    pub fn bootstrap_with_source(
        config: AppConfig,
        source: Arc<dyn ReachabilitySource>,
    ) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        capability::install_host_default();

        let reachability =
            ReachabilityMonitor::new(source, MonitorSettings::from(&config.reachability));

        let reporter = Arc::new(
            ErrorReporter::from_config(&config.reporter).with_reachability(reachability.clone()),
        );
        install_fault_observer(reporter.clone());

        let retry = RetryExecutor::new(reporter.clone(), RetryPolicy::from(&config.retry));

        tracing::info!(
            capacity = reporter.capacity(),
            max_retries = config.retry.max_retries,
            reachability_enabled = config.reachability.enabled,
            "Runtime initialized"
        );

        Ok(Self {
            config,
            reporter,
            reachability,
            retry,
            shutdown: Shutdown::new(),
            monitor_task: None,
        })
    }

    /// Spawn the reachability loop if enabled. Calling twice is a no-op.
    pub fn start(&mut self) {
        if !self.config.reachability.enabled || self.monitor_task.is_some() {
            return;
        }
        let monitor = self.reachability.clone();
        self.monitor_task = Some(tokio::spawn(monitor.run(self.shutdown.subscribe())));
    }

    pub fn is_running(&self) -> bool {
        self.monitor_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn reporter(&self) -> Arc<ErrorReporter> {
        self.reporter.clone()
    }

    pub fn reachability(&self) -> &ReachabilityMonitor {
        &self.reachability
    }

    pub fn retry(&self) -> &RetryExecutor {
        &self.retry
    }

    /// Stop the monitor loop and detach the fault observer.
    pub async fn shutdown(mut self) {
        self.shutdown.trigger();

        if let Some(task) = self.monitor_task.take() {
            match tokio::time::timeout(Duration::from_secs(5), task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!(error = %e, "Reachability monitor task failed"),
                Err(_) => tracing::warn!("Reachability monitor did not stop in time"),
            }
        }

        detach_fault_observer(&self.reporter);
        tracing::info!("Shutdown complete");
    }
}

fn source_for(config: &AppConfig) -> Arc<dyn ReachabilitySource> {
    match &config.reachability.probe_address {
        Some(address) => Arc::new(TcpProbe::new(
            address.clone(),
            Duration::from_millis(config.reachability.probe_timeout_ms),
        )),
        None => Arc::new(NoSignal),
    }
}
