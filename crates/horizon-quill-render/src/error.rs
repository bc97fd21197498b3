//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while configuring text layout or drawing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A text metric was zero, negative or not finite.
    #[error("invalid text metric `{field}`: {value}")]
    InvalidMetric { field: &'static str, value: f32 },

    /// A text scale factor was zero, negative or not finite.
    #[error("invalid text scale factor: {0}")]
    InvalidScaleFactor(f32),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
