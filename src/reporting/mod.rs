//! Error reporting subsystem.
//!
//! # Data Flow
//! ```text
//! log_error / log_warning / log_info
//!     → event.rs (id, timestamp, context, fingerprint)
//!     → tracing subscriber (synchronous emit)
//!     → ring buffer (most recent first, bounded)
//!
//! panic anywhere in the process
//!     → fault_hook.rs → log_error_message (tagged global)
//!
//! failure shown to an end user
//!     → friendly.rs (pure rule table)
//! ```

pub mod event;
pub mod fault_hook;
pub mod friendly;
pub mod reporter;

pub use event::{ErrorContext, ErrorEvent, ErrorLevel, RuntimeFingerprint};
pub use fault_hook::{detach_fault_observer, install_fault_observer};
pub use friendly::{user_friendly_message, FailureKind};
pub use reporter::{ErrorReporter, DEFAULT_CAPACITY, DEFAULT_RECENT_COUNT};
