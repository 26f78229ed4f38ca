//! Metrics collection.
//!
//! # Responsibilities
//! - Count recorded events, retry attempts, reachability transitions and
//!   intercepted faults
//!
//! # Metrics
//! - `resilience_events_recorded_total` (counter): by level
//! - `resilience_retry_attempts_total` (counter): failed attempts that were retried
//! - `resilience_reachability_transitions_total` (counter): by new state
//! - `resilience_faults_intercepted_total` (counter): panics seen by the fault observer
//!
//! # Design Decisions
//! - Facade only; no exporter is installed by this crate
//! - Without a recorder every call is a no-op

use metrics::counter;

pub fn record_event(level: &'static str) {
    counter!("resilience_events_recorded_total", "level" => level).increment(1);
}

pub fn record_retry_attempt() {
    counter!("resilience_retry_attempts_total").increment(1);
}

pub fn record_reachability_transition(state: &'static str) {
    counter!("resilience_reachability_transitions_total", "state" => state).increment(1);
}

pub fn record_fault_intercepted() {
    counter!("resilience_faults_intercepted_total").increment(1);
}
