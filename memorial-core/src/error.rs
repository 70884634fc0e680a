//! Error types for design operations.

use thiserror::Error;

/// Result type for design operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors that can occur while manipulating or importing a design.
#[derive(Debug, Error)]
pub enum DesignError {
    /// Element not found in the design.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A template identifier failed validation.
    #[error("invalid template id: {0:?}")]
    InvalidTemplateId(String),

    /// An imported document failed validation; the live design is untouched.
    #[error("invalid design document: {0}")]
    InvalidDocument(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
