//! Host reachability signal sources.
//!
//! # Responsibilities
//! - Report the host's current connectivity, if it has any notion of it
//! - Optionally push raw online/offline signals as they happen
//!
//! # Design Decisions
//! - `None` from `current` means "host exposes no signal", not "offline"
//! - Push events are raw: duplicates are filtered by the monitor, not here
//! - One source per host, chosen by the composition root

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time;

/// A host-specific connectivity signal.
pub trait ReachabilitySource: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Current signal, or `None` when the host has none.
    fn current(&self) -> BoxFuture<'_, Option<bool>>;

    /// Push-style transitions, on hosts that emit them.
    fn subscribe(&self) -> Option<broadcast::Receiver<bool>> {
        None
    }
}

/// Source for hosts that expose no connectivity signal at all.
#[derive(Debug, Default)]
pub struct NoSignal;

impl ReachabilitySource for NoSignal {
    fn name(&self) -> &'static str {
        "none"
    }

    fn current(&self) -> BoxFuture<'_, Option<bool>> {
        async { None }.boxed()
    }
}

const SIGNAL_UNKNOWN: u8 = 0;
const SIGNAL_ONLINE: u8 = 1;
const SIGNAL_OFFLINE: u8 = 2;

/// Source fed by a host adapter (e.g. a platform connectivity callback).
///
/// Each [`ManualSource::set`] is both stored for polling and pushed to
/// subscribers.
#[derive(Debug)]
pub struct ManualSource {
    signal: AtomicU8,
    events: broadcast::Sender<bool>,
}

impl ManualSource {
    pub fn new(initial: Option<bool>) -> Self {
        let (events, _) = broadcast::channel(64);
        let source = Self {
            signal: AtomicU8::new(SIGNAL_UNKNOWN),
            events,
        };
        if let Some(online) = initial {
            source.signal.store(encode(online), Ordering::SeqCst);
        }
        source
    }

    /// Record a raw signal from the host.
    pub fn set(&self, online: bool) {
        self.signal.store(encode(online), Ordering::SeqCst);
        // No receivers just means nobody is watching yet.
        let _ = self.events.send(online);
    }

    /// Forget the current signal (host stopped reporting).
    pub fn clear(&self) {
        self.signal.store(SIGNAL_UNKNOWN, Ordering::SeqCst);
    }

    fn load(&self) -> Option<bool> {
        match self.signal.load(Ordering::SeqCst) {
            SIGNAL_ONLINE => Some(true),
            SIGNAL_OFFLINE => Some(false),
            _ => None,
        }
    }
}

impl Default for ManualSource {
    fn default() -> Self {
        Self::new(None)
    }
}

fn encode(online: bool) -> u8 {
    if online {
        SIGNAL_ONLINE
    } else {
        SIGNAL_OFFLINE
    }
}

impl ReachabilitySource for ManualSource {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn current(&self) -> BoxFuture<'_, Option<bool>> {
        let signal = self.load();
        async move { signal }.boxed()
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<bool>> {
        Some(self.events.subscribe())
    }
}

/// Poll-only source that treats a successful TCP connect as "online".
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl ReachabilitySource for TcpProbe {
    fn name(&self) -> &'static str {
        "tcp-probe"
    }

    fn current(&self) -> BoxFuture<'_, Option<bool>> {
        async move {
            match connect_within(&self.address, self.timeout).await {
                Ok(_stream) => Some(true),
                Err(e) => {
                    tracing::debug!(address = %self.address, error = %e, "Reachability probe failed");
                    Some(false)
                }
            }
        }
        .boxed()
    }
}

/// Open a TCP connection to `address`, failing with `TimedOut` after `timeout`.
pub async fn connect_within(address: &str, timeout: Duration) -> io::Result<TcpStream> {
    bounded(address, timeout, TcpStream::connect(address)).await
}

async fn bounded<T, F>(address: &str, timeout: Duration, attempt: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match time::timeout(timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!(
                "network connect to {address} timed out after {}ms",
                timeout.as_millis()
            ),
        )),
    }
}
