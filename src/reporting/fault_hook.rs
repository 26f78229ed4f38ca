//! Process-wide fault observer.
//!
//! Panics are Rust's uncaught faults. A panic inside a spawned tokio task is
//! the unhandled asynchronous case: the task dies, the hook still runs on the
//! thread that was polling it.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::Cell;
use std::panic;
use std::sync::{Arc, Once};

use arc_swap::ArcSwapOption;

use crate::observability::metrics;
use crate::reporting::event::ErrorContext;
use crate::reporting::reporter::ErrorReporter;

static TARGET: ArcSwapOption<ErrorReporter> = ArcSwapOption::const_empty();
static INSTALL: Once = Once::new();

thread_local! {
    static REPORTING: Cell<bool> = const { Cell::new(false) };
}

/// Route every panic in the process to `reporter`.
///
/// The hook is installed once; later calls only retarget it. The previously
/// installed hook still runs after recording.
pub fn install_fault_observer(reporter: Arc<ErrorReporter>) {
    TARGET.store(Some(reporter));

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let message = match info.payload().downcast_ref::<&str>() {
                Some(s) => (*s).to_string(),
                None => match info.payload().downcast_ref::<String>() {
                    Some(s) => s.clone(),
                    None => "panic with non-string payload".to_string(),
                },
            };
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            report_fault(message, location);
            previous(info);
        }));
        tracing::debug!("Fault observer installed");
    });
}

/// Stop recording faults into `reporter`.
///
/// Only clears the target if it still points at `reporter`; a reporter
/// installed later by another owner keeps receiving faults. Returns `true`
/// if the target was cleared. The hook stays installed and passes through.
pub fn detach_fault_observer(reporter: &Arc<ErrorReporter>) -> bool {
    let current = Some(reporter.clone());
    let previous = TARGET.compare_and_swap(&current, None::<Arc<ErrorReporter>>);
    matches!(&*previous, Some(p) if Arc::ptr_eq(p, reporter))
}

fn report_fault(message: String, location: Option<String>) {
    let Some(reporter) = TARGET.load_full() else {
        return;
    };

    let Some(_guard) = ReentryGuard::enter() else {
        return;
    };

    let backtrace = Backtrace::capture();
    let stack_trace = match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    };

    let thread = std::thread::current();
    let mut context = ErrorContext::new()
        .component("global")
        .action("unhandled_panic")
        .with("thread", thread.name().unwrap_or("<unnamed>"));
    if let Some(location) = location {
        context = context.with("location", location);
    }

    metrics::record_fault_intercepted();
    reporter.log_error_message(message, stack_trace, Some(context));
}

/// Marks the current thread as recording a fault until dropped.
///
/// Recording runs inside the panic hook, so a panic raised while recording
/// aborts the process rather than reaching this guard again. The guard only
/// stops nested hook invocations that do return, and it yields nothing
/// once the thread's locals are being torn down.
struct ReentryGuard;

impl ReentryGuard {
    fn enter() -> Option<Self> {
        match REPORTING.try_with(|flag| flag.replace(true)) {
            Ok(false) => Some(ReentryGuard),
            _ => None,
        }
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        let _ = REPORTING.try_with(|flag| flag.set(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reentry_guard_blocks_nested_recording() {
        let outer = ReentryGuard::enter();
        assert!(outer.is_some());
        assert!(ReentryGuard::enter().is_none());

        drop(outer);
        assert!(ReentryGuard::enter().is_some());
    }

    #[test]
    fn test_reentry_guard_is_per_thread() {
        let _outer = ReentryGuard::enter();
        let other = std::thread::spawn(|| ReentryGuard::enter().is_some())
            .join()
            .unwrap();
        assert!(other);
    }
}
