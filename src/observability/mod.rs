//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events; the reporter's diagnostic channel)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - Local only: no log shipping, sampling or aggregation
//! - Metrics are cheap (facade calls, no-op without a recorder)

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
