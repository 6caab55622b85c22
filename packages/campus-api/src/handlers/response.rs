//! Error response envelope for HTTP endpoints.
//!
//! Success responses are the bare resource JSON; only failures are
//! wrapped.

use serde::Serialize;

/// Error information carried in an error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code (HTTP status code as string)
    pub code: String,
    /// Error message
    pub message: String,
    /// Optional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Consistent error response wrapper
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false for error responses
    pub success: bool,
    /// Error information
    pub error: ApiError,
}

/// Helper to create error response
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}
