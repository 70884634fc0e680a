//! Error types for backend requests.

use thiserror::Error;

/// Result type for backend requests.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the storefront backend.
///
/// None of these is fatal: every variant degrades to a user-visible
/// notification, and the local design is never affected by a failed
/// request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An endpoint URL from configuration is invalid.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The HTTP layer failed (connection, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected record shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The service answered with an error payload.
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Error message from the service, if it provided one.
        message: String,
    },

    /// The request was rejected client-side before any network call.
    #[error("validation failed: {0}")]
    Validation(String),
}
