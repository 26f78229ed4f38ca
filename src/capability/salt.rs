//! bcrypt-style salt generation.
//!
//! The password-hashing routine used by the authentication collaborators
//! needs exactly two things from its host: random salt bytes and a
//! timing-safe digest comparison. Both are provided here on top of the shim.

use crate::capability::compare::constant_time_equals;
use crate::capability::random::secure_random_bytes;
use crate::capability::types::{CapabilityError, CapabilityResult};

/// bcrypt's base64 alphabet (not RFC 4648).
const BCRYPT_ALPHABET: &[u8; 64] =
    b"./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const SALT_BYTES: usize = 16;
pub const MIN_ROUNDS: u32 = 4;
pub const MAX_ROUNDS: u32 = 31;
pub const DEFAULT_ROUNDS: u32 = 10;

/// Generate a salt string of the form `$2b$NN$<22 chars>`.
pub fn generate_salt(rounds: u32) -> CapabilityResult<String> {
    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
        return Err(CapabilityError::InvalidArgument(format!(
            "bcrypt rounds must be between {} and {}, got {}",
            MIN_ROUNDS, MAX_ROUNDS, rounds
        )));
    }

    let bytes = secure_random_bytes(SALT_BYTES)?;
    Ok(format!("$2b${:02}${}", rounds, bcrypt_base64(&bytes)))
}

/// Compare two encoded digests without leaking the mismatch position.
pub fn digests_match(expected: &str, candidate: &str) -> bool {
    constant_time_equals(expected.as_bytes(), candidate.as_bytes())
}

/// Encode with the bcrypt alphabet, no padding.
fn bcrypt_base64(input: &[u8]) -> String {
    let mut out = String::with_capacity((input.len() * 4).div_ceil(3));
    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let n = (b0 << 16) | (b1 << 8) | b2;

        let emit = chunk.len() + 1;
        for i in 0..emit {
            let index = (n >> (18 - 6 * i)) & 0x3f;
            out.push(BCRYPT_ALPHABET[index as usize] as char);
        }
    }
    out
}
