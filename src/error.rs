//! Error types for the color extractor.

use thiserror::Error;

/// Errors produced while building a pixel buffer or parsing colors.
///
/// Lookups outside the image, operations without a loaded image and duplicate
/// colors are not errors: they surface as `None` or [`crate::AddOutcome::Duplicate`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The RGBA sample slice does not hold exactly width * height * 4 bytes.
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Encoded image bytes could not be decoded.
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}
