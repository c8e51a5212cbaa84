#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! eink7-dither: perceptual error-diffusion dithering for 7-color e-ink
//!
//! Converts continuous-tone RGB images to the seven inks of ACeP-style
//! panels (black, white, green, blue, red, yellow, orange). Each pixel is
//! matched to the perceptually nearest ink in CIE Lab, and the quantization
//! error is diffused to its neighbors with Floyd-Steinberg or
//! Jarvis-Judice-Ninke, scanning rows in serpentine order.
//!
//! # Quick Start
//!
//! The [`Ditherer`] builder is the primary entry point:
//!
//! ```
//! use eink7_dither::{Ditherer, KernelKind, Shape};
//!
//! // 2x2 mid-gray, channel-interleaved, values 0.0..=255.0
//! let pixels = vec![128.0; 2 * 2 * 3];
//!
//! let mut ditherer = Ditherer::eink7().kernel(KernelKind::FloydSteinberg);
//! let result = ditherer.dither(&pixels, Shape::rgb(2, 2)).unwrap();
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.indices().len(), 4);
//! ```
//!
//! For a single image there is also the free function [`dither()`].
//!
//! # Pipeline
//!
//! - [`Enhance`] (optional): saturation, contrast and brightness boost
//! - [`Ditherer`]: serpentine scan, per-pixel matching, error diffusion
//! - [`NearestColor`]: palette lookup memoized by exact RGB triple
//! - [`DitheredImage`]: RGB output plus the palette index of every pixel
//!
//! # Color Matching
//!
//! Palette entries are converted to Lab once, at construction. An input
//! color is converted on its first occurrence and the winning index is
//! cached, so photographs with many repeated colors touch the palette
//! search rarely. Distance defaults to a reduced CIEDE2000 form (lightness,
//! chroma and hue differences, unweighted); see [`Lab::delta_e`].
//! [`DistanceMetric`] also offers plain CIE76 and raw RGB distance.
//!
//! Working values stay in the 0..=255 gamma-encoded scale throughout; error
//! is diffused in that scale and every neighbor is clamped after receiving
//! its share.
//!
//! # Concurrency
//!
//! One image is one sequential pass. Independent images can be dithered in
//! parallel with [`dither_batch`], sharing a [`SharedMatcher`].

pub mod analysis;
pub mod api;
pub mod color;
pub mod dither;
pub mod matcher;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod shape;


pub use analysis::{color_histogram, comparison, palette_preview, ColorCount};
pub use api::{dither, dither_batch, DitherError, Ditherer, ImageRef};
pub use color::{rgb_to_lab, Lab, Rgb};
pub use dither::{
    DitherOptions, Kernel, KernelError, KernelKind, Tap, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE,
};
pub use matcher::{CacheStats, ColorCache, NearestColor, PaletteMatcher, SharedMatcher};
pub use output::DitheredImage;
pub use palette::{DistanceMetric, EinkColor, Palette, PaletteError, ParseColorError};
pub use preprocess::Enhance;
pub use shape::{Shape, ShapeError};
