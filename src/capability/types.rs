//! Capability error and grade definitions.

use thiserror::Error;

/// Errors raised by capability providers.
///
/// These propagate straight to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The host cannot perform this primitive at all.
    #[error("{operation} is unsupported on this host ({host})")]
    Unsupported {
        /// Name of the primitive that was requested.
        operation: String,
        /// Name of the active provider.
        host: &'static str,
    },

    /// The secure random source failed and no fallback is permitted.
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// A buffer sub-range does not fit the buffer.
    #[error("range {offset}..{offset}+{length} out of bounds for buffer of {size} bytes")]
    OutOfRange {
        offset: usize,
        length: usize,
        size: usize,
    },

    /// Caller supplied an argument the primitive cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Strength of the random source behind a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomGrade {
    /// Backed by the operating system CSPRNG.
    Cryptographic,
    /// Backed by a pseudo-random generator. Never use for key material.
    NonCryptographic,
}

impl RandomGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            RandomGrade::Cryptographic => "cryptographic",
            RandomGrade::NonCryptographic => "non-cryptographic",
        }
    }
}
