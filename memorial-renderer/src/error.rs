//! Renderer error types.

use thiserror::Error;

/// Result type for export operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while exporting a design.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The SVG intermediate could not be parsed back for rasterization.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Rasterization or encoding failed.
    #[error("export failed: {0}")]
    Export(String),
}
