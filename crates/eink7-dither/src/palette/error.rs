//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Wrong number of hex digits (must be 3 or 6 after stripping '#')
    #[error("invalid hex color length {0} (expected 3 or 6 digits)")]
    InvalidLength(usize),
    /// A character that is not a hexadecimal digit
    #[error("invalid hex character {0:?}")]
    InvalidDigit(char),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette must contain at least one color")]
    EmptyPalette,
    /// More entries than an 8-bit index map can address
    #[error("palette has {len} colors, at most {max} are supported")]
    TooManyColors {
        /// Number of colors supplied
        len: usize,
        /// Largest supported palette
        max: usize,
    },
    /// Duplicate color found at the specified index
    #[error("duplicate color at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Unrecognized distance metric name
    #[error("unknown distance metric {0:?} (expected simplified-ciede2000, cie76 or rgb)")]
    UnknownMetric(String),
}
