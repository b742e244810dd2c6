//! Response construction.
//!
//! # Responsibilities
//! - Serialize car payloads as JSON
//! - Build body-less responses for 202 and every error
//! - Stamp `Content-type: application/json` on all of them
//!
//! # Design Decisions
//! - The content type is set even when no body is sent
//! - A payload that fails to serialize becomes a bare 500

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response with a JSON-serialized body.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => build(status, Body::from(bytes)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// A response with only a status line and headers.
pub fn empty(status: StatusCode) -> Response {
    build(status, Body::empty())
}

fn build(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}
