//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Operation subject to transient failure:
//!     → retries.rs (attempt, on failure compute delay)
//!     → backoff.rs (base * factor^attempt, capped)
//!     → sleep, warn through the error reporter, attempt again
//!     → last failure propagates unchanged
//! ```
//!
//! # Design Decisions
//! - Deterministic backoff (no jitter): callers can predict the schedule
//! - Retry on every failure kind; classification belongs to the caller

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{retry_with_backoff, RetryExecutor, RetryPolicy};
