//! Reachability subsystem.
//!
//! # Data Flow
//! ```text
//! Host signal (source.rs):
//!     push event ──┐
//!     fallback poll┴→ monitor.rs observe()
//!                      → state.rs (only on actual change)
//!                      → observers (UI banner, reporter enrichment)
//!
//! Callers:
//!     is_online() / wait_for_network() → source.rs directly
//! ```
//!
//! # Design Decisions
//! - Absence of a signal reads as online
//! - Duplicate raw signals never produce a notification
//! - An observer and the loop it needs detach as one unit (ReachabilityWatch)

pub mod monitor;
pub mod source;
pub mod state;

pub use monitor::{MonitorSettings, ObserverId, ReachabilityMonitor, ReachabilityWatch};
pub use source::{connect_within, ManualSource, NoSignal, ReachabilitySource, TcpProbe};
pub use state::ReachabilityState;
