//! Reachability monitor.
//!
//! # Responsibilities
//! - Answer "are we online?" from the host source
//! - Track the last known state and notify observers on transitions
//! - Run the push + fallback-poll loop until told to stop

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::ReachabilityConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::reachability::source::ReachabilitySource;
use crate::reachability::state::ReachabilityState;

/// Identifier handed out by [`ReachabilityMonitor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Arc<dyn Fn(&ReachabilityState) + Send + Sync>;

/// Polling cadence for the monitor.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Interval used by `wait_for_network`.
    pub poll_interval: Duration,
    /// Interval of the background poll that backs up push events.
    pub fallback_poll_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            fallback_poll_interval: Duration::from_millis(5000),
        }
    }
}

impl From<&ReachabilityConfig> for MonitorSettings {
    fn from(config: &ReachabilityConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            fallback_poll_interval: Duration::from_millis(config.fallback_poll_interval_ms),
        }
    }
}

struct Inner {
    source: Arc<dyn ReachabilitySource>,
    settings: MonitorSettings,
    state: Mutex<ReachabilityState>,
    /// Held for the whole of a transition so observers see them in order.
    dispatch: Mutex<()>,
    observers: DashMap<ObserverId, Observer>,
    next_id: AtomicU64,
}

/// Shared view of network availability. Cloning yields another handle to
/// the same monitor.
#[derive(Clone)]
pub struct ReachabilityMonitor {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ReachabilityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReachabilityMonitor")
            .field("source", &self.inner.source.name())
            .field("state", &self.last_known())
            .field("observers", &self.inner.observers.len())
            .finish()
    }
}

impl ReachabilityMonitor {
    pub fn new(source: Arc<dyn ReachabilitySource>, settings: MonitorSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                settings,
                state: Mutex::new(ReachabilityState::default()),
                dispatch: Mutex::new(()),
                observers: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// The host's current signal, or `true` if it exposes none.
    pub async fn is_online(&self) -> bool {
        self.inner.source.current().await.unwrap_or(true)
    }

    /// Snapshot of the last observed state.
    pub fn last_known(&self) -> ReachabilityState {
        lock(&self.inner.state).clone()
    }

    /// Resolve `true` once online, or `false` after `timeout`.
    ///
    /// The deadline covers the initial check as well, so a slow source can
    /// not stretch the wait past `timeout`.
    pub async fn wait_for_network(&self, timeout: Duration) -> bool {
        let poll = self.inner.settings.poll_interval;
        let wait = async {
            if self.is_online().await {
                return;
            }
            loop {
                time::sleep(poll).await;
                if self.is_online().await {
                    return;
                }
            }
        };

        match time::timeout(timeout, wait).await {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Gave up waiting for network");
                false
            }
        }
    }

    /// Feed a raw signal. Returns `true` if it was a transition.
    ///
    /// Observers run on the caller's thread, outside the state lock, and
    /// must not call `observe` themselves.
    pub fn observe(&self, online: bool) -> bool {
        let _dispatch = lock(&self.inner.dispatch);

        let snapshot = {
            let mut state = lock(&self.inner.state);
            if state.online == online {
                return false;
            }
            *state = ReachabilityState::now(online);
            state.clone()
        };

        tracing::info!(state = snapshot.label(), source = self.inner.source.name(), "Reachability changed");
        metrics::record_reachability_transition(snapshot.label());

        let observers: Vec<Observer> = self
            .inner
            .observers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
        true
    }

    /// Register a transition observer.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&ReachabilityState) + Send + Sync + 'static,
    {
        let id = ObserverId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.observers.insert(id, Arc::new(observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.inner.observers.remove(&id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    /// Subscribe `observer` and start the monitor loop, both owned by the
    /// returned handle.
    pub fn watch<F>(&self, observer: F) -> ReachabilityWatch
    where
        F: Fn(&ReachabilityState) + Send + Sync + 'static,
    {
        let id = self.subscribe(observer);
        let shutdown = Shutdown::new();
        let task = tokio::spawn(self.clone().run(shutdown.subscribe()));
        ReachabilityWatch {
            monitor: self.clone(),
            id,
            shutdown,
            task,
        }
    }

    /// Consume push events and poll on the fallback interval until shutdown.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut events = self.inner.source.subscribe();
        let fallback = self.inner.settings.fallback_poll_interval;

        tracing::info!(
            source = self.inner.source.name(),
            push_events = events.is_some(),
            fallback_ms = fallback.as_millis() as u64,
            "Reachability monitor starting"
        );

        let mut ticker = time::interval(fallback);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(online) = self.inner.source.current().await {
                        self.observe(online);
                    }
                }
                online = next_push(&mut events) => {
                    self.observe(online);
                }
                _ = shutdown.recv() => {
                    tracing::info!("Reachability monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

/// Wait for the next pushed signal; pends forever without a push channel.
async fn next_push(events: &mut Option<broadcast::Receiver<bool>>) -> bool {
    loop {
        let Some(rx) = events.as_mut() else {
            return std::future::pending().await;
        };
        match rx.recv().await {
            Ok(online) => return online,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Reachability events lagged");
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Reachability push channel closed, relying on polling");
                *events = None;
            }
        }
    }
}

/// An observer plus the monitor loop, torn down together on drop.
#[derive(Debug)]
pub struct ReachabilityWatch {
    monitor: ReachabilityMonitor,
    id: ObserverId,
    shutdown: Shutdown,
    task: JoinHandle<()>,
}

impl ReachabilityWatch {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Stop observing. Same as dropping the handle.
    pub fn detach(self) {}
}

impl Drop for ReachabilityWatch {
    fn drop(&mut self) {
        self.monitor.unsubscribe(self.id);
        self.shutdown.trigger();
        self.task.abort();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
