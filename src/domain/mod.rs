//! Domain model.
//!
//! A car is the only entity the service manages. Its field set is fixed:
//! `{id, make, model, year, price}`. The id is chosen by the caller at
//! creation and never changes afterwards.

pub mod car;

pub use car::{Car, CarFields, CarId};
