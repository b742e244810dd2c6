//! Request dispatch.
//!
//! One handler serves every method and target: it resolves the operation,
//! hands it to the service with a lazy body reader, and turns the result
//! into a response.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::api::{ApiError, ApiResult};
use crate::http::request::{raw_target, request_id};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing;

/// Catch-all handler implementing the car API.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let target = raw_target(&request);
    let request_id = request_id(&request).to_string();

    let operation = match routing::resolve(&method, &target) {
        Ok(op) => op,
        Err(e) => {
            tracing::info!(request_id = %request_id, method = %method, target = %target, reason = %e, "Rejected request syntax");
            metrics::record_request("unrouted", StatusCode::BAD_REQUEST.as_u16(), start_time);
            return ApiError::from(e).into_response();
        }
    };

    let limit = state.max_body_bytes;
    let body = request.into_body();
    let result = state
        .service
        .handle(&operation, move || read_body(body, limit))
        .await;

    let op_name = operation.name();
    let car_id = operation.car_id().unwrap_or("-");
    let response = match result {
        Ok(outcome) => {
            tracing::debug!(request_id = %request_id, operation = op_name, car_id, status = outcome.status().as_u16(), "Request served");
            outcome.into_response()
        }
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, operation = op_name, car_id, error = %err, "Request failed");
            } else {
                tracing::info!(request_id = %request_id, operation = op_name, car_id, status = status.as_u16(), reason = %err, "Request rejected");
            }
            err.into_response()
        }
    };

    metrics::record_request(op_name, response.status().as_u16(), start_time);
    response
}

/// Read the whole body, bounded by `limit` bytes.
async fn read_body(body: Body, limit: usize) -> ApiResult<Bytes> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ApiError::Syntax(format!("unreadable body: {e}")))
}
