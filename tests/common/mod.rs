//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use app_resilience::reachability::ReachabilityState;

/// Bind a listener on an ephemeral local port and keep accepting until the
/// test ends.
pub async fn start_listener() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    addr
}

/// An address that was listening a moment ago and is now closed.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A transition observer that counts calls, plus a handle to the count.
pub fn counting_observer() -> (
    Arc<AtomicUsize>,
    impl Fn(&ReachabilityState) + Send + Sync + 'static,
) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    (count, move |_: &ReachabilityState| {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

/// Error type with a source, for source-chain tests.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ChainedError {
    pub message: String,
    #[source]
    pub source: std::io::Error,
}
