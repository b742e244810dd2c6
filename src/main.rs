//! Car service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (Axum, middleware)
//!                         │
//!                         ▼
//!                     routing (target grammar → Operation)
//!                         │
//!                         ▼
//!                     api::service (existence / body / uniqueness checks)
//!                         │
//!                         ▼
//!                     store (one call: get / insert / update / delete)
//!                         │
//!     Client Response     ▼
//!     ◀────────────── http::response (status + application/json)
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use car_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use car_service::lifecycle::{shutdown_requested, Shutdown};
use car_service::observability::{logging, metrics};
use car_service::HttpServer;

#[derive(Parser)]
#[command(name = "car-service")]
#[command(about = "HTTP service managing car records", long_about = None)]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("car-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        seed_cars = config.store.seed.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        shutdown_requested().await;
        on_signal.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
