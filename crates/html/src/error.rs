use thiserror::Error;

/// Errors produced while rendering a layout model.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configured class prefix cannot be used inside a `class` attribute.
    #[error("invalid class prefix {0:?}: expected ASCII letters, digits, '-' or '_'")]
    InvalidClassPrefix(String),
    /// The layout could not be serialized.
    #[error("failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),
}
