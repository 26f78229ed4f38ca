//! Exponential backoff.

use std::time::Duration;

/// Delay before retrying after failed attempt `attempt` (0-based).
///
/// `base * factor^attempt`, capped at `max`. Products that overflow, are not
/// finite, or come from a negative factor are clamped to `max`.
pub fn calculate_backoff(attempt: u32, base: Duration, factor: f64, max: Duration) -> Duration {
    let exponent = attempt.min(i32::MAX as u32) as i32;
    let secs = base.as_secs_f64() * factor.powi(exponent);

    if !secs.is_finite() || secs < 0.0 || secs >= max.as_secs_f64() {
        return max;
    }

    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_sequence() {
        let base = Duration::from_millis(1000);
        let max = Duration::from_millis(10_000);
        let delays: Vec<u128> = (0..5)
            .map(|attempt| calculate_backoff(attempt, base, 2.0, max).as_millis())
            .collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 10_000]);
    }

    #[test]
    fn test_large_attempt_is_capped() {
        let max = Duration::from_secs(10);
        assert_eq!(calculate_backoff(u32::MAX, Duration::from_secs(1), 2.0, max), max);
        assert_eq!(calculate_backoff(5000, Duration::from_secs(1), 1.5, max), max);
    }

    #[test]
    fn test_degenerate_factors() {
        let base = Duration::from_millis(100);
        let max = Duration::from_secs(1);
        assert_eq!(calculate_backoff(3, base, 1.0, max), base);
        assert_eq!(calculate_backoff(1, base, f64::NAN, max), max);
        assert_eq!(calculate_backoff(1, base, -2.0, max), max);
    }
}
