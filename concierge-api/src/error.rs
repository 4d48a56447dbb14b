//! Error types for the Concierge API.
//!
//! Every failure response uses one documented envelope: `{ "error": string }`.
//! The message strings are part of the client contract and fixed per error
//! code; internal detail (driver errors, query text) is logged server-side
//! and never crosses the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error categories, each mapping to one HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Required client input is missing or empty (400).
    MissingInput,
    /// The supplied token does not match the expected tag (401).
    InvalidToken,
    /// No stored record matches the verified tag (404).
    NotFound,
    /// Unexpected server-side failure (500).
    InternalError,
    /// The relational store is unavailable or a query failed (500).
    DatabaseError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MissingInput => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::MissingInput => "Missing required input",
            ErrorCode::InvalidToken => "Invalid HMAC",
            ErrorCode::NotFound => "No data found for this HMAC",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Internal server error (database)",
        }
    }
}

// ============================================================================
// ERROR ENVELOPE
// ============================================================================

/// The wire shape of every failure response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
}

/// Structured error carried through handlers; rendered as [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    /// Error code categorizing the failure.
    pub code: ErrorCode,
    /// Client-facing message placed in the envelope.
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a new API error with the code's fixed client-facing message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Missing or empty client input, with the endpoint's documented message.
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingInput, message)
    }

    /// Token mismatch. The response deliberately carries no further detail.
    pub fn invalid_token() -> Self {
        Self::from_code(ErrorCode::InvalidToken)
    }

    /// No stored record for the verified tag.
    pub fn not_found() -> Self {
        Self::from_code(ErrorCode::NotFound)
    }

    /// Unexpected server-side failure.
    pub fn internal_error() -> Self {
        Self::from_code(ErrorCode::InternalError)
    }

    /// Store unavailable or query failure.
    pub fn database_error() -> Self {
        Self::from_code(ErrorCode::DatabaseError)
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Render the error as its envelope with the mapped status code, so handlers
/// can return `ApiError` directly.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM STORE ERRORS
// ============================================================================

impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        // Log the full error; the client only sees the generic message.
        tracing::error!("Database query error: {:?}", err);
        ApiError::database_error()
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        tracing::error!("Connection pool error: {:?}", err);
        ApiError::database_error()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
