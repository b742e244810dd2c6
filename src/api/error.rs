//! Error taxonomy and its status-code contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::CarId;
use crate::http::response;
use crate::routing::RouteError;
use crate::store::StoreError;
use crate::validation::BodyError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a request can fail.
///
/// Responses carry a status line and the JSON content type, never a body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed target, unsupported method, or a body that is not JSON.
    #[error("bad request syntax: {0}")]
    Syntax(String),

    #[error("car {0} not found")]
    NotFound(CarId),

    /// JSON body with the wrong key set or value types.
    #[error("unprocessable body: {0}")]
    UnprocessableBody(String),

    #[error("car {0} already exists")]
    Conflict(CarId),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Syntax(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        ApiError::Syntax(err.to_string())
    }
}

impl From<BodyError> for ApiError {
    fn from(err: BodyError) -> Self {
        if err.is_unprocessable() {
            ApiError::UnprocessableBody(err.to_string())
        } else {
            ApiError::Syntax(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        response::empty(self.status())
    }
}
