//! Error types
//!
//! Typed validator failures and the HTTP-facing error, both built on thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Validation Error Enum ==
/// Why a document or date failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong number of digits after stripping punctuation
    #[error("expected {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Every digit is the same (e.g. 111.111.111-11)
    #[error("all digits are identical")]
    RepeatedDigits,

    /// A computed check digit does not match the input
    #[error("check digit {position} does not match")]
    ChecksumMismatch { position: usize },

    /// Not a Brazilian landline or mobile number
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// Malformed or impossible calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

// == API Error Enum ==
/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key absent or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
