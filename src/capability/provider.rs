//! Host capability providers.
//!
//! # Responsibilities
//! - Supply random bytes from the best source the host has
//! - Refuse, loudly, primitives the host cannot reproduce
//!
//! # Design Decisions
//! - One provider per target host, picked at build time (`HostProvider`)
//! - The native provider fails closed when the OS source errors
//! - The constrained provider is a PRNG and says so in its grade and logs

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::capability::buffer::BinaryBuffer;
use crate::capability::types::{CapabilityError, CapabilityResult, RandomGrade};

/// Minimal primitive surface a password-hashing routine expects from its host.
pub trait CapabilityProvider: Send + Sync + 'static {
    /// Short host name used in logs and unsupported-operation errors.
    fn name(&self) -> &'static str;

    /// Strength of [`CapabilityProvider::fill_bytes`].
    fn grade(&self) -> RandomGrade;

    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> CapabilityResult<()>;

    fn digest(&self, algorithm: &str, _data: &[u8]) -> CapabilityResult<BinaryBuffer> {
        Err(self.unsupported(format!("digest({algorithm})")))
    }

    fn encrypt(&self, algorithm: &str, _key: &[u8], _data: &[u8]) -> CapabilityResult<BinaryBuffer> {
        Err(self.unsupported(format!("encrypt({algorithm})")))
    }

    fn generate_key_pair(&self, algorithm: &str) -> CapabilityResult<(BinaryBuffer, BinaryBuffer)> {
        Err(self.unsupported(format!("generate_key_pair({algorithm})")))
    }

    fn unsupported(&self, operation: String) -> CapabilityError {
        tracing::error!(host = self.name(), operation = %operation, "Unsupported capability requested");
        CapabilityError::Unsupported { operation, host: self.name() }
    }
}

/// Provider for hosts with an operating-system CSPRNG.
#[derive(Debug, Default)]
pub struct NativeProvider;

impl CapabilityProvider for NativeProvider {
    fn name(&self) -> &'static str {
        "native"
    }

    fn grade(&self) -> RandomGrade {
        RandomGrade::Cryptographic
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> CapabilityResult<()> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            tracing::error!(error = %e, "OS random source failed");
            CapabilityError::RandomSourceUnavailable(e.to_string())
        })
    }
}

/// Provider for hosts without a secure random source.
///
/// Only selected when the crate is built with the `constrained-host` feature.
/// Output comes from `fastrand` and is NOT suitable for secrets.
#[derive(Debug, Default)]
pub struct ConstrainedProvider {
    warned: AtomicBool,
}

impl ConstrainedProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CapabilityProvider for ConstrainedProvider {
    fn name(&self) -> &'static str {
        "constrained"
    }

    fn grade(&self) -> RandomGrade {
        RandomGrade::NonCryptographic
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> CapabilityResult<()> {
        if !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                grade = RandomGrade::NonCryptographic.as_str(),
                "Random bytes served by a pseudo-random generator; output is not cryptographic-grade"
            );
        }
        fastrand::fill(dest);
        Ok(())
    }
}

/// Provider compiled in for this target.
#[cfg(not(feature = "constrained-host"))]
pub type HostProvider = NativeProvider;

/// Provider compiled in for this target.
#[cfg(feature = "constrained-host")]
pub type HostProvider = ConstrainedProvider;
