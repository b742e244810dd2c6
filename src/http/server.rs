//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (tracing, timeout, request ID, content type)
//! - Own the car service and its store
//! - Serve until the shutdown signal fires

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::CarService;
use crate::config::ServiceConfig;
use crate::http::handlers::dispatch;
use crate::http::request::{propagate_request_id, set_request_id};
use crate::http::response::JSON_CONTENT_TYPE;
use crate::store::{CarStore, MemoryStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CarService>,
    pub max_body_bytes: usize,
}

/// HTTP server for the car API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server backed by an in-memory store seeded from config.
    pub fn new(config: ServiceConfig) -> Self {
        let store = MemoryStore::with_seed(config.store.seed.clone());
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<dyn CarStore>) -> Self {
        let state = AppState {
            service: Arc::new(CarService::new(store)),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        // The path grammar is ours, not Axum's, so everything goes to one handler.
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            // Outside the timeout so 408s are stamped too.
            .layer(SetResponseHeaderLayer::if_not_present(
                CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            ))
            .layer(propagate_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id())
    }

    /// A handle to the router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
