//! Car record and its mutable field set.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Caller-assigned car identifier.
pub type CarId = String;

/// A stored car record.
///
/// `price` keeps the JSON number exactly as submitted so that a record
/// created with `9300` is served back as `9300`, not `9300.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: Number,
}

/// The fields an update replaces. Everything except the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarFields {
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: Number,
}

impl Car {
    /// Replace every mutable field. The id is left untouched.
    pub fn apply(&mut self, fields: CarFields) {
        self.make = fields.make;
        self.model = fields.model;
        self.year = fields.year;
        self.price = fields.price;
    }
}
