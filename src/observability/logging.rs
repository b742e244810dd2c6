//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the output format (pretty or JSON)
//! - Apply the configured level unless `RUST_LOG` overrides it

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

pub use tracing_subscriber::util::TryInitError;

/// Build the level filter: `RUST_LOG` if set, else the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "car_service={level},tower_http={level}",
            level = config.log_level
        ))
    })
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .try_init()
}
