//! Runtime capability shim.
//!
//! # Data Flow
//! ```text
//! Startup (composition root):
//!     install(HostProvider) → process-wide provider (set once)
//!
//! Dependent routine (e.g. salt generation):
//!     secure_random_bytes / fill_random → provider().fill_bytes
//!     constant_time_equals              → pure, no provider
//!     digest / encrypt / key pairs      → provider, Unsupported by default
//! ```
//!
//! # Design Decisions
//! - A capability adapter, not a crypto library
//! - Registration is idempotent: the first provider wins
//! - Unsupported primitives are errors, never silent fallbacks

pub mod buffer;
pub mod compare;
pub mod provider;
pub mod random;
pub mod salt;
pub mod types;

use std::sync::OnceLock;

pub use buffer::BinaryBuffer;
pub use compare::constant_time_equals;
pub use provider::{CapabilityProvider, ConstrainedProvider, HostProvider, NativeProvider};
pub use random::{fill_random, secure_random_bytes};
pub use salt::{digests_match, generate_salt};
pub use types::{CapabilityError, CapabilityResult, RandomGrade};

static PROVIDER: OnceLock<Box<dyn CapabilityProvider>> = OnceLock::new();

/// Register `provider` as the process-wide capability source.
///
/// Returns `false` if a provider was already installed; the existing one is
/// kept.
pub fn install<P: CapabilityProvider>(provider: P) -> bool {
    let mut installed = false;
    PROVIDER.get_or_init(|| {
        installed = true;
        Box::new(provider)
    });

    if installed {
        let active = provider_ref();
        tracing::info!(host = active.name(), grade = active.grade().as_str(), "Capability provider installed");
    }
    installed
}

/// Register the provider compiled in for this target.
pub fn install_host_default() -> bool {
    install(HostProvider::default())
}

/// The active provider, installing the host default on first use.
pub fn provider() -> &'static dyn CapabilityProvider {
    if let Some(active) = PROVIDER.get() {
        return active.as_ref();
    }
    install_host_default();
    provider_ref()
}

fn provider_ref() -> &'static dyn CapabilityProvider {
    PROVIDER.get_or_init(|| Box::new(HostProvider::default())).as_ref()
}

pub fn digest(algorithm: &str, data: &[u8]) -> CapabilityResult<BinaryBuffer> {
    provider().digest(algorithm, data)
}

pub fn encrypt(algorithm: &str, key: &[u8], data: &[u8]) -> CapabilityResult<BinaryBuffer> {
    provider().encrypt(algorithm, key, data)
}

pub fn generate_key_pair(algorithm: &str) -> CapabilityResult<(BinaryBuffer, BinaryBuffer)> {
    provider().generate_key_pair(algorithm)
}
