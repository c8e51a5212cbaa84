//! Unified error type for the eink7-dither public API.
//!
//! [`DitherError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::dither::KernelError;
use crate::palette::{PaletteError, ParseColorError};
use crate::shape::ShapeError;

/// Unified error type for the eink7-dither public API.
///
/// # Example
///
/// ```
/// use eink7_dither::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # create_palette().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DitherError {
    /// Palette validation error (empty, too large, duplicate, or parse error)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Invalid or unknown diffusion kernel
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
    /// Buffer length disagrees with the declared image shape
    #[error("invalid image shape: {0}")]
    Shape(#[from] ShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_prefixes_source() {
        let err = DitherError::from(ShapeError::Channels(4));
        assert_eq!(
            err.to_string(),
            "invalid image shape: expected 3 channels per pixel, got 4"
        );
        let err = DitherError::from(KernelError::Empty);
        assert_eq!(err.to_string(), "kernel error: kernel must have at least one tap");
    }

    #[test]
    fn test_source_is_wrapped_error() {
        let err = DitherError::from(PaletteError::EmptyPalette);
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("palette must contain at least one color"));
    }

    #[test]
    fn test_question_mark_conversion() {
        fn parse() -> Result<crate::Rgb, DitherError> {
            Ok("#12".parse::<crate::Rgb>()?)
        }
        assert_eq!(
            parse(),
            Err(DitherError::ParseColor(ParseColorError::InvalidLength(2)))
        );
    }
}
