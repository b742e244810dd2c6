//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, raw target)
//!     → target.rs (grammar: /cars | /car/<id> | syntax error)
//!     → router.rs (operation table lookup)
//!     → Return: Operation or RouteError
//! ```
//!
//! # Design Decisions
//! - Pure functions: no store access, no body inspection
//! - Deterministic: same method and target always resolve the same way
//! - First match wins, in table order

pub mod router;
pub mod target;

pub use router::{resolve, Operation, RouteError, Verb};
pub use target::{parse_target, Shape, Target, TargetError};
