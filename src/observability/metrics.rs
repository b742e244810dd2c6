//! Metrics collection and exposition.
//!
//! # Metrics
//! - `car_service_requests_total` (counter): requests by operation, status
//! - `car_service_request_duration_seconds` (histogram): latency by operation
//! - `car_service_cars` (gauge): records currently stored
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing when the exporter is off.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "car_service_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("car_service_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(cars: usize) {
    gauge!("car_service_cars").set(cars as f64);
}
