//! Request-target grammar.
//!
//! # Responsibilities
//! - Recognize the collection target `/cars`
//! - Recognize item targets `/car/<resource-id>`
//! - Reject everything else as a syntax error
//!
//! # Design Decisions
//! - Matching is case-sensitive and works on the raw target (query string
//!   included, no percent-decoding)
//! - The item target is split on the first `/` after the leading one only,
//!   so a resource id may itself contain `/`
//! - No trailing-slash tolerance: `/cars/` is not the collection

use thiserror::Error;

/// Path of the collection resource.
pub const COLLECTION_PATH: &str = "/cars";

/// First segment of every item path.
pub const ITEM_SEGMENT: &str = "car";

/// Shape of a parsed request target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Collection,
    Item,
}

/// A syntactically valid request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `/cars`
    Collection,
    /// `/car/<resource-id>` with a non-empty id.
    Item(String),
}

impl Target {
    pub fn shape(&self) -> Shape {
        match self {
            Target::Collection => Shape::Collection,
            Target::Item(_) => Shape::Item,
        }
    }
}

/// Why a request target failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("target {0:?} does not start with '/'")]
    NotAbsolute(String),

    #[error("target {0:?} has no resource separator")]
    MissingSeparator(String),

    #[error("unknown resource {0:?}")]
    UnknownResource(String),

    #[error("empty resource id")]
    EmptyId,
}

/// Parse a raw request target.
pub fn parse_target(raw: &str) -> Result<Target, TargetError> {
    if raw == COLLECTION_PATH {
        return Ok(Target::Collection);
    }

    let rest = raw
        .strip_prefix('/')
        .ok_or_else(|| TargetError::NotAbsolute(raw.to_string()))?;

    let (segment, resource) = rest
        .split_once('/')
        .ok_or_else(|| TargetError::MissingSeparator(raw.to_string()))?;

    if segment != ITEM_SEGMENT {
        return Err(TargetError::UnknownResource(segment.to_string()));
    }
    if resource.is_empty() {
        return Err(TargetError::EmptyId);
    }

    Ok(Target::Item(resource.to_string()))
}
