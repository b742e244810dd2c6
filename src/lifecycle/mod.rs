//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() resolves → server drains
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown_requested() resolves → trigger()
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_requested;
