//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the seven default panel colors
//! and the error types for parsing and validation.

mod eink;
mod error;
mod palette;

pub use eink::EinkColor;
pub use error::{PaletteError, ParseColorError};
pub use palette::{DistanceMetric, Palette, MAX_PALETTE_LEN};
