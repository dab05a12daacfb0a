use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use docseb_core::error::SessionError;
use docseb_instruments::error::InstrumentError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => {
                tracing::warn!("rejected session request: {msg}");
                (StatusCode::UNAUTHORIZED, msg)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::UnknownInstrument(id) => {
                ApiError::NotFound(format!("instrument not found: {id}"))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MalformedPin => ApiError::BadRequest(e.to_string()),
            SessionError::PinMismatch => ApiError::Unauthorized(e.to_string()),
        }
    }
}
