//! Retry executor.
//!
//! # Responsibilities
//! - Run an async operation up to `max_retries + 1` times
//! - Sleep with exponential backoff between attempts
//! - Downgrade intermediate failures to warnings; surface only the last one
//!
//! # Design Decisions
//! - No retry classification: every failure is retried. Callers that need
//!   selective retry filter inside the operation.
//! - The sleep is the only suspension point and holds no lock

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::reporting::{ErrorContext, ErrorReporter};
use crate::resilience::backoff::calculate_backoff;

/// Retry behavior for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay after the first failure.
    pub base_delay: Duration,
    /// Cap for any single delay.
    pub max_delay: Duration,
    /// Growth per attempt.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay to wait after failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_delay, self.backoff_factor, self.max_delay)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_factor: config.backoff_factor,
        }
    }
}

/// Run `operation` under `policy`, reporting retried failures to `reporter`.
///
/// `action` labels the warnings so they can be traced back to the caller.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    reporter: &ErrorReporter,
    action: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries {
                    tracing::debug!(action, attempts = attempt + 1, "Retries exhausted");
                    return Err(err);
                }

                let delay = policy.delay_for(attempt);
                tokio::time::sleep(delay).await;

                metrics::record_retry_attempt();
                let delay_ms = delay.as_millis() as u64;
                reporter.log_warning(
                    format!(
                        "Attempt {} of {} failed, retrying after {}ms: {}",
                        attempt + 1,
                        policy.max_retries + 1,
                        delay_ms,
                        err
                    ),
                    Some(
                        ErrorContext::new()
                            .component("retry")
                            .action(action)
                            .with("attempt", attempt)
                            .with("delayMs", delay_ms)
                            .with("error", err.to_string()),
                    ),
                );

                attempt += 1;
            }
        }
    }
}

/// Retry runner bound to a reporter and a default policy.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    reporter: Arc<ErrorReporter>,
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(reporter: Arc<ErrorReporter>, policy: RetryPolicy) -> Self {
        Self { reporter, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` under the default policy.
    pub async fn execute<T, E, F, Fut>(&self, action: &str, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        retry_with_backoff(&self.policy, &self.reporter, action, operation).await
    }

    /// Run `operation` under an explicit policy.
    pub async fn execute_with<T, E, F, Fut>(
        &self,
        policy: &RetryPolicy,
        action: &str,
        operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        retry_with_backoff(policy, &self.reporter, action, operation).await
    }
}
