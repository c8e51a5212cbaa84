//! Color types and conversion utilities
//!
//! - [`Rgb`]: byte-exact gamma-encoded color, used for I/O and cache keys.
//! - [`Lab`]: CIE L*a*b* (D65), used to rank palette candidates.
//!
//! # Example
//!
//! ```
//! use eink7_dither::{rgb_to_lab, Lab, Rgb};
//!
//! let lab: Lab = Rgb::new(128, 64, 32).into();
//! assert_eq!(lab, rgb_to_lab(128, 64, 32));
//! ```

mod lab;
mod lut;
mod rgb;

pub use lab::{rgb_to_lab, Lab};
pub use lut::{srgb8_to_linear, srgb_to_linear};
pub use rgb::Rgb;
