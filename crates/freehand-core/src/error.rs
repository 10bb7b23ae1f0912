//! Error types for freehand.

use thiserror::Error;

/// Result type alias using [`SketchError`].
pub type SketchResult<T> = Result<T, SketchError>;

/// Errors surfaced by brush updates, export, and configuration.
///
/// Drawing itself never fails: a degenerate surface turns draws into no-ops.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Value could not be parsed as a CSS color.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// The surface has no pixels to export.
    #[error("surface is empty: {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(String),

    /// A PNG data URL could not be produced or read back: the browser
    /// canvas refused to serialize, or the URL is not base64 PNG data.
    #[error("canvas export failed: {0}")]
    Export(String),

    /// Configuration JSON could not be read.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<png::EncodingError> for SketchError {
    fn from(err: png::EncodingError) -> Self {
        SketchError::Png(err.to_string())
    }
}

impl From<serde_json::Error> for SketchError {
    fn from(err: serde_json::Error) -> Self {
        SketchError::Config(err.to_string())
    }
}
