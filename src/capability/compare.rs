//! Constant-time comparison.

use std::hint::black_box;

/// Compare two byte slices in time that depends only on their length.
///
/// Returns `false` immediately when the lengths differ. Otherwise every byte
/// pair is visited; differences are OR-accumulated so the loop has no early
/// exit.
pub fn constant_time_equals(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= black_box(x ^ y);
    }

    black_box(diff) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_equals(b"", b""));
        assert!(constant_time_equals(b"secret", b"secret"));
    }

    #[test]
    fn test_mismatch_at_any_position() {
        assert!(!constant_time_equals(b"xecret", b"secret"));
        assert!(!constant_time_equals(b"secrex", b"secret"));
        assert!(!constant_time_equals(b"seXret", b"secret"));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!constant_time_equals(b"secret", b"secrets"));
        assert!(!constant_time_equals(b"", b"a"));
    }
}
