mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::time::{self, Instant};

use app_resilience::reachability::{
    connect_within, ManualSource, MonitorSettings, NoSignal, ReachabilityMonitor,
    ReachabilitySource, TcpProbe,
};
use common::{closed_address, counting_observer, start_listener};

/// Poll-only source, for exercising the fallback loop without push events.
struct PollOnly(AtomicBool);

impl ReachabilitySource for PollOnly {
    fn name(&self) -> &'static str {
        "poll-only"
    }

    fn current(&self) -> BoxFuture<'_, Option<bool>> {
        let online = self.0.load(Ordering::SeqCst);
        async move { Some(online) }.boxed()
    }
}

/// Source whose every check takes `delay` and reports offline.
struct Slow {
    delay: Duration,
}

impl ReachabilitySource for Slow {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn current(&self) -> BoxFuture<'_, Option<bool>> {
        async move {
            time::sleep(self.delay).await;
            Some(false)
        }
        .boxed()
    }
}

fn monitor(source: Arc<dyn ReachabilitySource>) -> ReachabilityMonitor {
    ReachabilityMonitor::new(source, MonitorSettings::default())
}

#[test]
fn test_notifications_match_state_changes() {
    let monitor = monitor(Arc::new(NoSignal));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    monitor.subscribe(move |state| s.lock().unwrap().push(state.online));

    let signals = [false, false, true, true, true, false, true, false, false];
    let mut previous = true;
    let mut expected = Vec::new();
    for online in signals {
        if online != previous {
            expected.push(online);
            previous = online;
        }
        monitor.observe(online);
    }

    assert_eq!(*seen.lock().unwrap(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_network_resolves_on_recovery() {
    let source = Arc::new(ManualSource::new(Some(false)));
    let monitor = monitor(source.clone());

    let flip = source.clone();
    tokio::spawn(async move {
        time::sleep(Duration::from_millis(2500)).await;
        flip.set(true);
    });

    let start = Instant::now();
    assert!(monitor.wait_for_network(Duration::from_secs(10)).await);
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_network_times_out() {
    let monitor = monitor(Arc::new(ManualSource::new(Some(false))));

    let start = Instant::now();
    assert!(!monitor.wait_for_network(Duration::from_millis(2500)).await);
    assert_eq!(start.elapsed(), Duration::from_millis(2500));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_network_deadline_includes_first_check() {
    let monitor = monitor(Arc::new(Slow {
        delay: Duration::from_secs(3),
    }));

    let start = Instant::now();
    assert!(!monitor.wait_for_network(Duration::from_millis(1000)).await);
    assert_eq!(start.elapsed(), Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_push_events_notify_once_per_change() {
    let source = Arc::new(ManualSource::new(Some(true)));
    let monitor = monitor(source.clone());
    let (count, observer) = counting_observer();

    let watch = monitor.watch(observer);
    time::sleep(Duration::from_millis(10)).await;

    source.set(false);
    time::sleep(Duration::from_millis(10)).await;
    source.set(false);
    time::sleep(Duration::from_millis(10)).await;
    source.set(true);
    time::sleep(Duration::from_millis(10)).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(monitor.last_known().online);

    drop(watch);
    assert_eq!(monitor.observer_count(), 0);

    source.set(false);
    time::sleep(Duration::from_millis(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fallback_poll_detects_change() {
    let source = Arc::new(PollOnly(AtomicBool::new(true)));
    let monitor = monitor(source.clone());
    let (count, observer) = counting_observer();

    let _watch = monitor.watch(observer);
    time::sleep(Duration::from_millis(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    source.0.store(false, Ordering::SeqCst);
    time::sleep(Duration::from_millis(4000)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!monitor.last_known().online);
}

#[tokio::test]
async fn test_tcp_probe_online_and_offline() {
    let open = start_listener().await;
    let probe = TcpProbe::new(open.to_string(), Duration::from_secs(2));
    assert_eq!(probe.current().await, Some(true));

    let closed = closed_address().await;
    let probe = TcpProbe::new(closed.to_string(), Duration::from_secs(2));
    assert_eq!(probe.current().await, Some(false));

    let monitor = monitor(Arc::new(probe));
    assert!(!monitor.is_online().await);

    assert!(connect_within(&open.to_string(), Duration::from_secs(2)).await.is_ok());
    assert!(connect_within(&closed.to_string(), Duration::from_secs(2)).await.is_err());
}
