//! Resilience and runtime-compatibility layer.
//!
//! Bounded error reporting, retry with exponential backoff, network
//! reachability monitoring, and a capability shim for hosts with a reduced
//! runtime surface.

pub mod capability;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod reachability;
pub mod reporting;
pub mod resilience;

pub use config::schema::AppConfig;
pub use lifecycle::{AppRuntime, Shutdown};
pub use reachability::ReachabilityMonitor;
pub use reporting::ErrorReporter;
pub use resilience::{RetryExecutor, RetryPolicy};
