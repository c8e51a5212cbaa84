//! Declared geometry of an interleaved RGB buffer.

use thiserror::Error;

/// Rejection of a buffer whose length disagrees with its declared geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected 3 channels per pixel, got {0}")]
    Channels(usize),
    #[error("{width}x{height}x3 overflows the addressable buffer size")]
    Overflow { width: usize, height: usize },
    #[error("buffer holds {actual} values but {width}x{height}x3 requires {expected}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// Width, height and channel count of a row-major, channel-interleaved
/// buffer. Only `channels == 3` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl Shape {
    pub const RGB_CHANNELS: usize = 3;

    pub const fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Three-channel shape.
    pub const fn rgb(width: usize, height: usize) -> Self {
        Self::new(width, height, Self::RGB_CHANNELS)
    }

    /// `width * height`, or `None` on overflow.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check that a buffer of `len` values matches this shape.
    ///
    /// Returns the pixel count on success. Zero-sized shapes are valid and
    /// expect an empty buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use eink7_dither::{Shape, ShapeError};
    ///
    /// assert_eq!(Shape::rgb(2, 3).validate(18), Ok(6));
    /// assert!(matches!(
    ///     Shape::rgb(2, 3).validate(17),
    ///     Err(ShapeError::LengthMismatch { .. })
    /// ));
    /// ```
    pub fn validate(&self, len: usize) -> Result<usize, ShapeError> {
        if self.channels != Self::RGB_CHANNELS {
            return Err(ShapeError::Channels(self.channels));
        }
        let overflow = || ShapeError::Overflow {
            width: self.width,
            height: self.height,
        };
        let pixels = self.pixel_count().ok_or_else(overflow)?;
        let expected = pixels
            .checked_mul(Self::RGB_CHANNELS)
            .ok_or_else(overflow)?;
        if len != expected {
            return Err(ShapeError::LengthMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: len,
            });
        }
        Ok(pixels)
    }
}
