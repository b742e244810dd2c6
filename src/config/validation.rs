//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Check addresses parse
//! - Check seed cars have usable, unique ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("store.seed entry {0} has an empty id")]
    EmptySeedId(usize),

    #[error("store.seed id {0:?} appears more than once")]
    DuplicateSeedId(String),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let mut seen = HashSet::new();
    for (index, car) in config.store.seed.iter().enumerate() {
        if car.id.is_empty() {
            errors.push(ValidationError::EmptySeedId(index));
        } else if !seen.insert(car.id.as_str()) {
            errors.push(ValidationError::DuplicateSeedId(car.id.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
