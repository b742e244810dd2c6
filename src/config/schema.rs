//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::domain::Car;

/// Root configuration for the car service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Initial store contents.
    pub store: StoreConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one request, body read included.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body read before the request is rejected.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level filter, used when `RUST_LOG` is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Cars present when the service starts.
    pub seed: Vec<Car>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8081");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.store.seed.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"

            [observability]
            log_format = "json"

            [[store.seed]]
            id = "1"
            make = "Fiat"
            model = "Panda"
            year = 2004
            price = 1500.5
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.limits.max_body_bytes, 64 * 1024);
        assert_eq!(config.store.seed.len(), 1);
        assert_eq!(config.store.seed[0].price.as_f64(), Some(1500.5));
    }
}
