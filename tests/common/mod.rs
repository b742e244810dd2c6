//! Shared utilities for integration testing.

use serde_json::Number;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use car_service::config::ServiceConfig;
use car_service::domain::Car;
use car_service::{HttpServer, Shutdown};

/// A running server on an ephemeral port. Stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, target: &str) -> String {
        format!("http://{}{}", self.addr, target)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// The cars a freshly started reference deployment holds.
pub fn seed_cars() -> Vec<Car> {
    vec![
        car("1", "Toyota", "Corolla", 2008, 4500),
        car("2", "Honda", "Civic", 2012, 7200),
        car("3", "Ford", "Focus", 2010, 5100),
    ]
}

pub fn car(id: &str, make: &str, model: &str, year: i64, price: u64) -> Car {
    Car {
        id: id.into(),
        make: make.into(),
        model: model.into(),
        year,
        price: Number::from(price),
    }
}

/// Start a server seeded with [`seed_cars`].
pub async fn start_server() -> TestServer {
    let mut config = ServiceConfig::default();
    config.store.seed = seed_cars();
    start_server_with(config).await
}

pub async fn start_server_with(mut config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
