mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use app_resilience::config::AppConfig;
use app_resilience::reachability::ManualSource;
use app_resilience::AppRuntime;

#[tokio::test(start_paused = true)]
async fn test_events_carry_last_known_reachability() {
    let source = Arc::new(ManualSource::new(Some(true)));
    let mut runtime =
        AppRuntime::bootstrap_with_source(AppConfig::default(), source.clone()).unwrap();
    runtime.start();
    time::sleep(Duration::from_millis(10)).await;

    let reporter = runtime.reporter();
    reporter.log_info("while online", None);

    source.set(false);
    time::sleep(Duration::from_millis(10)).await;
    reporter.log_info("while offline", None);

    let events = reporter.get_recent_errors(2);
    assert_eq!(events[0].network_online, Some(false));
    assert_eq!(events[1].network_online, Some(true));
    assert!(events[0]
        .runtime_fingerprint
        .as_ref()
        .unwrap()
        .client
        .starts_with("app-resilience/"));

    runtime.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_retry_warnings_land_in_runtime_reporter() {
    let mut config = AppConfig::default();
    config.retry.max_retries = 2;
    config.reachability.enabled = false;
    let runtime = AppRuntime::bootstrap(config).unwrap();

    let result: Result<(), &str> = runtime
        .retry()
        .execute("fetch_profile", || async { Err("fetch failed") })
        .await;

    assert_eq!(result, Err("fetch failed"));
    let reporter = runtime.reporter();
    assert_eq!(reporter.len(), 2);

    let shown = reporter.handle_failure(&std::io::Error::other("fetch failed"), None);
    assert!(shown.contains("internet connection"));

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_probe_configured_source() {
    let addr = common::start_listener().await;
    let mut config = AppConfig::default();
    config.reachability.probe_address = Some(addr.to_string());

    let runtime = AppRuntime::bootstrap(config).unwrap();
    assert!(runtime.reachability().is_online().await);
    runtime.shutdown().await;
}
