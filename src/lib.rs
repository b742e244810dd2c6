//! Car records over HTTP.
//!
//! A single-resource CRUD service: `/cars` is the collection, `/car/<id>`
//! an item. Requests are parsed into an operation, validated in a fixed
//! order and applied to an owned store.

pub mod api;
pub mod config;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;
pub mod validation;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
