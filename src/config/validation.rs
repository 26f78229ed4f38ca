//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, intervals > 0, sane backoff)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("reporter.capacity must be at least 1")]
    ZeroCapacity,

    #[error("retry.backoff_factor must be a finite number >= 1.0, got {0}")]
    BackoffFactor(f64),

    #[error("retry.max_delay_ms ({max}) is smaller than retry.base_delay_ms ({base})")]
    DelayBounds { base: u64, max: u64 },

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("reachability.probe_address {0:?} is not of the form host:port")]
    ProbeAddress(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.reporter.capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    let retry = &config.retry;
    if !retry.backoff_factor.is_finite() || retry.backoff_factor < 1.0 {
        errors.push(ValidationError::BackoffFactor(retry.backoff_factor));
    }
    if retry.max_delay_ms < retry.base_delay_ms {
        errors.push(ValidationError::DelayBounds {
            base: retry.base_delay_ms,
            max: retry.max_delay_ms,
        });
    }

    let reachability = &config.reachability;
    if reachability.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval("reachability.poll_interval_ms"));
    }
    if reachability.fallback_poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval("reachability.fallback_poll_interval_ms"));
    }
    if reachability.probe_timeout_ms == 0 {
        errors.push(ValidationError::ZeroInterval("reachability.probe_timeout_ms"));
    }
    if let Some(address) = &reachability.probe_address {
        let valid = address
            .rsplit_once(':')
            .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::ProbeAddress(address.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.reporter.capacity = 0;
        config.retry.backoff_factor = f64::NAN;
        config.retry.max_delay_ms = 10;
        config.reachability.poll_interval_ms = 0;
        config.reachability.probe_address = Some("no-port".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroCapacity));
        assert!(errors.contains(&ValidationError::DelayBounds { base: 1000, max: 10 }));
        assert!(errors.contains(&ValidationError::ZeroInterval("reachability.poll_interval_ms")));
    }

    #[test]
    fn test_probe_address_forms() {
        let mut config = AppConfig::default();
        config.reachability.probe_address = Some("api.example.com:443".to_string());
        assert!(validate_config(&config).is_ok());

        config.reachability.probe_address = Some(":443".to_string());
        assert!(validate_config(&config).is_err());
    }
}
