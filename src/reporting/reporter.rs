//! Error reporter.
//!
//! # Responsibilities
//! - Record error/warning/info events into a bounded ring buffer
//! - Emit every event to the tracing subscriber as it is recorded
//! - Turn raw failures into user-presentable text
//!
//! # Design Decisions
//! - Most recent first; the oldest event is evicted at capacity
//! - Inserts are mutex-serialized; a poisoned lock is recovered, not raised
//! - No public operation returns an error or panics

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::ReporterConfig;
use crate::observability::metrics;
use crate::reachability::ReachabilityMonitor;
use crate::reporting::event::{ErrorContext, ErrorEvent, ErrorLevel, RuntimeFingerprint};
use crate::reporting::friendly::user_friendly_message;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default `count` for [`ErrorReporter::get_recent_errors`].
pub const DEFAULT_RECENT_COUNT: usize = 10;

/// Process-lifetime sink for failure visibility.
#[derive(Debug)]
pub struct ErrorReporter {
    events: Mutex<VecDeque<ErrorEvent>>,
    capacity: usize,
    fingerprint: Option<RuntimeFingerprint>,
    reachability: Option<ReachabilityMonitor>,
}

impl ErrorReporter {
    /// A reporter holding at most `capacity` events (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            fingerprint: None,
            reachability: None,
        }
    }

    pub fn from_config(config: &ReporterConfig) -> Self {
        Self::new(config.capacity).with_fingerprint(RuntimeFingerprint::new(
            config.client_id.clone(),
            config.location.clone(),
        ))
    }

    pub fn with_fingerprint(mut self, fingerprint: RuntimeFingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Stamp events with the monitor's last known state.
    pub fn with_reachability(mut self, monitor: ReachabilityMonitor) -> Self {
        self.reachability = Some(monitor);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Record an error together with its source chain.
    pub fn log_error<E>(&self, error: &E, context: Option<ErrorContext>)
    where
        E: StdError + ?Sized,
    {
        self.log_error_message(error.to_string(), source_chain(error), context);
    }

    /// Record an error from a message and an optional trace.
    pub fn log_error_message(
        &self,
        message: impl Into<String>,
        stack_trace: Option<String>,
        context: Option<ErrorContext>,
    ) {
        self.record(ErrorLevel::Error, message.into(), stack_trace, context);
    }

    pub fn log_warning(&self, message: impl Into<String>, context: Option<ErrorContext>) {
        self.record(ErrorLevel::Warning, message.into(), None, context);
    }

    pub fn log_info(&self, message: impl Into<String>, context: Option<ErrorContext>) {
        self.record(ErrorLevel::Info, message.into(), None, context);
    }

    /// The `count` most recent events, most recent first.
    pub fn get_recent_errors(&self, count: usize) -> Vec<ErrorEvent> {
        self.lock().iter().take(count).cloned().collect()
    }

    /// Drop every stored event.
    pub fn clear_logs(&self) {
        let mut events = self.lock();
        let dropped = events.len();
        events.clear();
        drop(events);
        tracing::debug!(dropped, "Error log cleared");
    }

    /// Log `error` and return the text to show the user instead of it.
    pub fn handle_failure<E>(&self, error: &E, context: Option<ErrorContext>) -> &'static str
    where
        E: StdError + ?Sized,
    {
        self.log_error(error, context);
        user_friendly_message(&error.to_string())
    }

    fn record(
        &self,
        level: ErrorLevel,
        message: String,
        stack_trace: Option<String>,
        context: Option<ErrorContext>,
    ) {
        let mut event = ErrorEvent::new(level, message, stack_trace, context);
        event.runtime_fingerprint = self.fingerprint.clone();
        event.network_online = self.reachability.as_ref().map(|m| m.last_known().online);

        emit(&event);
        metrics::record_event(level.as_str());

        let mut events = self.lock();
        if events.len() >= self.capacity {
            events.pop_back();
        }
        events.push_front(event);
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ErrorEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn emit(event: &ErrorEvent) {
    let (action, component) = event
        .context
        .as_ref()
        .map(|c| (c.action.as_deref(), c.component.as_deref()))
        .unwrap_or((None, None));

    match event.level {
        ErrorLevel::Error => tracing::error!(
            event_id = %event.id,
            action = action,
            component = component,
            stack_trace = event.stack_trace.as_deref(),
            "{}",
            event.message
        ),
        ErrorLevel::Warning => tracing::warn!(
            event_id = %event.id,
            action = action,
            component = component,
            "{}",
            event.message
        ),
        ErrorLevel::Info => tracing::info!(
            event_id = %event.id,
            action = action,
            component = component,
            "{}",
            event.message
        ),
    }
}

/// Render `error.source()` and below, one "caused by" line each.
fn source_chain<E>(error: &E) -> Option<String>
where
    E: StdError + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        lines.push(format!("caused by: {cause}"));
        current = cause.source();
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
