//! Request body validation.
//!
//! # Data Flow
//! ```text
//! raw body bytes
//!     → parse as JSON (failure = syntax error)
//!     → schema check: key set == required key set (failure = unprocessable)
//!     → typed extraction into Car / CarFields (failure = unprocessable)
//! ```
//!
//! # Design Decisions
//! - Shape check is separate from deserialization so that "wrong keys"
//!   and "wrong value types" are reported distinctly in logs
//! - Exact set equality: subsets and supersets are both rejected

pub mod body;

pub use body::{BodyError, BodySchema, CREATE_SCHEMA, UPDATE_SCHEMA};
