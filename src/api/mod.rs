//! Request validation state machine.
//!
//! # Data Flow
//! ```text
//! Operation (from routing)
//!     → service.rs (existence / body / uniqueness checks, in order)
//!     → CarStore (at most one mutation, under the write gate)
//!     → Outcome (200 / 202) or ApiError (400 / 404 / 409 / 422 / 500)
//! ```
//!
//! # Design Decisions
//! - Every check completes before any store mutation
//! - PUT resolves existence from the path before the body is read
//! - Check-then-act sequences run under one async mutex
//! - Each request is independent; the store is the only shared state

pub mod error;
pub mod service;

pub use error::{ApiError, ApiResult};
pub use service::{CarService, Outcome};
