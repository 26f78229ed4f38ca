//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → capability provider → reachability source + monitor
//!            → error reporter → fault observer → retry executor
//!     start(): spawn the reachability loop
//!
//! Shutdown (shutdown.rs):
//!     trigger → monitor loop exits → fault observer detached
//! ```
//!
//! # Design Decisions
//! - Ordered startup: capabilities first, reporter before anything that logs to it
//! - Every shared component is owned here and handed out as `Arc` or a cheap clone

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::AppRuntime;
