//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every section defaults so that an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the resilience layer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Error reporter settings.
    pub reporter: ReporterConfig,

    /// Default retry policy.
    pub retry: RetryConfig,

    /// Reachability monitor settings.
    pub reachability: ReachabilityConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Error reporter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Ring buffer capacity.
    pub capacity: usize,

    /// Client identifier stamped on every event.
    pub client_id: String,

    /// Optional location identifier (screen, route, deep link).
    pub location: Option<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            client_id: default_client_id(),
            location: None,
        }
    }
}

fn default_client_id() -> String {
    format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds.
    pub base_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds.
    pub max_delay_ms: u64,

    /// Growth factor applied per attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            backoff_factor: 2.0,
        }
    }
}

/// Reachability monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReachabilityConfig {
    /// Start the background monitor loop at startup.
    pub enabled: bool,

    /// Poll interval while waiting for the network, in milliseconds.
    pub poll_interval_ms: u64,

    /// Fallback poll interval backing up push events, in milliseconds.
    pub fallback_poll_interval_ms: u64,

    /// `host:port` to probe with a TCP connect. No probe means no signal.
    pub probe_address: Option<String>,

    /// Probe connect timeout in milliseconds.
    pub probe_timeout_ms: u64,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 1000,
            fallback_poll_interval_ms: 5000,
            probe_address: None,
            probe_timeout_ms: 3000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Colored output.
    pub ansi: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ansi: true,
        }
    }
}
