//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limit > 0, window > 0, timeouts > 0)
//! - Require a bearer token when auth is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over ServiceConfig
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServiceConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,
    #[error("rate_limit.limit must be greater than zero")]
    ZeroLimit,
    #[error("rate_limit.window_secs must be greater than zero")]
    ZeroWindow,
    #[error("rate_limit.cleanup_interval_secs must be greater than zero")]
    ZeroCleanupInterval,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("auth.bearer_token must be set when auth is enabled")]
    MissingBearerToken,
}

/// Check everything serde cannot, collecting every violation.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.rate_limit.enabled {
        if config.rate_limit.limit == 0 {
            errors.push(ValidationError::ZeroLimit);
        }
        if config.rate_limit.window_secs == 0 {
            errors.push(ValidationError::ZeroWindow);
        }
        if config.rate_limit.cleanup_interval_secs == 0 {
            errors.push(ValidationError::ZeroCleanupInterval);
        }
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.auth.enabled && config.auth.bearer_token.is_empty() {
        errors.push(ValidationError::MissingBearerToken);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
