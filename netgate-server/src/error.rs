//! Error types for the HTTP layer.
//!
//! Every failure is reported to the client the same way: HTTP 500 with a
//! JSON body carrying a single `error` message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use netgate::SessionError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not the JSON the endpoint expects.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error(transparent)]
    Device(#[from] SessionError),
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidBody(e) => error!("rejected request: {}", e),
            ApiError::Device(e) => error!("device operation failed ({:?}): {}", e.kind(), e),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
