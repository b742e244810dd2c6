//! JSON body parsing and key-set schemas.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Required key set for one kind of request body.
#[derive(Debug, Clone, Copy)]
pub struct BodySchema {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

/// Body of `POST /cars`.
pub const CREATE_SCHEMA: BodySchema = BodySchema {
    name: "create",
    keys: &["id", "make", "model", "year", "price"],
};

/// Body of `PUT /car/<id>`. The id comes from the path, never the body.
pub const UPDATE_SCHEMA: BodySchema = BodySchema {
    name: "update",
    keys: &["make", "model", "year", "price"],
};

#[derive(Debug, Error)]
pub enum BodyError {
    /// Not JSON at all (this includes an empty body).
    #[error("body is not valid JSON: {0}")]
    Unparsable(#[source] serde_json::Error),

    /// Valid JSON, but not an object, so it has no key set.
    #[error("body is not a JSON object")]
    NotAnObject,

    #[error("body keys do not match {schema} schema (missing: {missing:?}, unexpected: {unexpected:?})")]
    KeyMismatch {
        schema: &'static str,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Right keys, wrong value types.
    #[error("body values are invalid: {0}")]
    InvalidValues(#[source] serde_json::Error),
}

impl BodyError {
    /// True when the body parsed as JSON but had the wrong shape or values.
    pub fn is_unprocessable(&self) -> bool {
        !matches!(self, BodyError::Unparsable(_))
    }
}

/// Parse raw bytes as JSON.
pub fn parse_json(bytes: &[u8]) -> Result<Value, BodyError> {
    serde_json::from_slice(bytes).map_err(BodyError::Unparsable)
}

impl BodySchema {
    /// Check that `value` is an object whose key set equals this schema's.
    pub fn check<'a>(&self, value: &'a Value) -> Result<&'a Map<String, Value>, BodyError> {
        let object = value.as_object().ok_or(BodyError::NotAnObject)?;

        let required: BTreeSet<&str> = self.keys.iter().copied().collect();
        let present: BTreeSet<&str> = object.keys().map(String::as_str).collect();

        if required == present {
            return Ok(object);
        }

        Err(BodyError::KeyMismatch {
            schema: self.name,
            missing: required.difference(&present).map(|k| k.to_string()).collect(),
            unexpected: present.difference(&required).map(|k| k.to_string()).collect(),
        })
    }

    /// Parse, shape-check and deserialize a body in one go.
    pub fn extract<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, BodyError> {
        let value = parse_json(bytes)?;
        self.check(&value)?;
        serde_json::from_value(value).map_err(BodyError::InvalidValues)
    }
}
