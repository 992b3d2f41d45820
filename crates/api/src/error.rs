//! Centralized error handling with proper HTTP status codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API Result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types with appropriate HTTP status codes
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// The wire contract fixes the body shape to a flat `{"error": "..."}`
// string, not the nested `{"error": {"type", "message"}}` object this enum's
// ancestor used — every route, including rate limiting, must match it.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<dkg_switch::SwitchError> for ApiError {
    fn from(e: dkg_switch::SwitchError) -> Self {
        match e {
            dkg_switch::SwitchError::ProtocolAuth(m) => ApiError::Unauthorized(m),
            dkg_switch::SwitchError::ProtocolState(m) => ApiError::Conflict(m),
            dkg_switch::SwitchError::Decode(m) => ApiError::BadRequest(m),
            dkg_switch::SwitchError::Capacity(m) => ApiError::Conflict(m),
            dkg_switch::SwitchError::CryptoFatal(m) => ApiError::InternalError(m),
            dkg_switch::SwitchError::Evicted => ApiError::Conflict(e.to_string()),
        }
    }
}

impl From<dkg_wire::WireError> for ApiError {
    fn from(e: dkg_wire::WireError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
