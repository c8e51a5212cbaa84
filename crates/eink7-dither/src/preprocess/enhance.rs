//! Vibrancy enhancement applied before dithering.
//!
//! Seven-color panels render noticeably duller than a monitor, so images
//! are usually pushed a little before dithering. The chain is:
//!
//! 1. **Saturation**: blend each pixel with its own luma
//! 2. **Contrast**: blend each pixel with the image's mean luma
//! 3. **Brightness**: scale toward black
//!
//! Each stage clamps to 0..=255 and rounds to whole values before the next
//! stage runs, the same as chaining three 8-bit image operations.

use serde::{Deserialize, Serialize};

use crate::dither::sanitize_channel;
use crate::shape::{Shape, ShapeError};

/// Enhancement factors. `1.0` leaves a stage out.
///
/// # Presets
///
/// - [`Enhance::default()`]: identity
/// - [`Enhance::vibrant()`]: saturation 1.3, contrast 1.1, brightness 1.05
///
/// # Example
///
/// ```
/// use eink7_dither::{Enhance, Shape};
///
/// let mut pixels = vec![150.0, 100.0, 100.0];
/// Enhance::vibrant().apply(&mut pixels, Shape::rgb(1, 1)).unwrap();
/// assert!(pixels[0] - pixels[1] > 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enhance {
    /// 0.0 = grayscale, 1.0 = unchanged, above 1.0 = more saturated
    pub saturation: f32,
    /// 0.0 = flat mean gray, 1.0 = unchanged
    pub contrast: f32,
    /// 0.0 = black, 1.0 = unchanged
    pub brightness: f32,
}

impl Default for Enhance {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            contrast: 1.0,
            brightness: 1.0,
        }
    }
}

impl Enhance {
    /// Identity enhancement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset tuned for seven-color panels.
    pub fn vibrant() -> Self {
        Self {
            saturation: 1.3,
            contrast: 1.1,
            brightness: 1.05,
        }
    }

    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    /// `true` when every factor is 1.0.
    pub fn is_identity(&self) -> bool {
        is_one(self.saturation) && is_one(self.contrast) && is_one(self.brightness)
    }

    /// Enhance an RGB buffer in place.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if `pixels` does not match `shape`; the buffer
    /// is left untouched in that case.
    pub fn apply(&self, pixels: &mut [f32], shape: Shape) -> Result<(), ShapeError> {
        let pixel_count = shape.validate(pixels.len())?;
        if pixel_count == 0 || self.is_identity() {
            return Ok(());
        }

        if !is_one(self.saturation) {
            for px in pixels.chunks_exact_mut(3) {
                let gray = luma(px);
                for c in px.iter_mut() {
                    *c = blend(gray, *c, self.saturation);
                }
            }
        }

        if !is_one(self.contrast) {
            let total: f64 = pixels.chunks_exact(3).map(|px| f64::from(luma(px))).sum();
            let mean = (total / pixel_count as f64 + 0.5).floor() as f32;
            for c in pixels.iter_mut() {
                *c = blend(mean, *c, self.contrast);
            }
        }

        if !is_one(self.brightness) {
            for c in pixels.iter_mut() {
                *c = blend(0.0, *c, self.brightness);
            }
        }

        Ok(())
    }

    /// Enhance a copy of `pixels`.
    pub fn enhanced(&self, pixels: &[f32], shape: Shape) -> Result<Vec<f32>, ShapeError> {
        let mut out = pixels.to_vec();
        self.apply(&mut out, shape)?;
        Ok(out)
    }
}

#[inline]
fn is_one(factor: f32) -> bool {
    (factor - 1.0).abs() <= f32::EPSILON
}

/// ITU-R 601 luma, rounded to a whole value.
#[inline]
fn luma(px: &[f32]) -> f32 {
    let [r, g, b] = [
        sanitize_channel(px[0]),
        sanitize_channel(px[1]),
        sanitize_channel(px[2]),
    ];
    (0.299 * r + 0.587 * g + 0.114 * b).round()
}

/// `base + factor * (value - base)`, clamped and rounded.
#[inline]
fn blend(base: f32, value: f32, factor: f32) -> f32 {
    let value = sanitize_channel(value);
    sanitize_channel(base + factor * (value - base)).round()
}
