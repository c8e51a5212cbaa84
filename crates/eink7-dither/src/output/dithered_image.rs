//! DitheredImage: the quantized output of a dithering or quantize call.
//!
//! Holds the H×W×3 RGB buffer, where every pixel is byte-identical to a
//! palette entry, alongside the H×W index map that produced it.

use crate::color::Rgb;
use crate::palette::Palette;

/// The output of the dithering pipeline.
///
/// - [`rgb()`](DitheredImage::rgb): `[R, G, B, R, G, B, ...]` bytes, row-major
/// - [`indices()`](DitheredImage::indices): one palette index per pixel;
///   for [`Palette::eink7`] these are the panel's color codes
///
/// # Example
///
/// ```
/// use eink7_dither::{DitheredImage, Palette};
///
/// // A 2x2 black/white checkerboard
/// let image = DitheredImage::new(vec![0, 1, 1, 0], 2, 2, Palette::eink7());
///
/// assert_eq!(image.width(), 2);
/// assert_eq!(image.height(), 2);
/// assert_eq!(image.rgb().len(), 2 * 2 * 3);
/// assert_eq!(&image.rgb()[3..6], &[255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitheredImage {
    rgb: Vec<u8>,
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl DitheredImage {
    /// Build an image from palette indices, expanding them to RGB.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside the palette. Debug-asserts that
    /// `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        let rgb = indices
            .iter()
            .flat_map(|&idx| palette.color(idx as usize).to_bytes())
            .collect();
        Self::from_parts(rgb, indices, width, height, palette)
    }

    /// Assemble an image whose RGB buffer was written alongside the indices.
    pub(crate) fn from_parts(
        rgb: Vec<u8>,
        indices: Vec<u8>,
        width: usize,
        height: usize,
        palette: Palette,
    ) -> Self {
        debug_assert_eq!(rgb.len(), indices.len() * 3);
        Self {
            rgb,
            indices,
            width,
            height,
            palette,
        }
    }

    /// RGB bytes, `width * height * 3` long.
    #[inline]
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Take ownership of the RGB buffer.
    pub fn into_rgb(self) -> Vec<u8> {
        self.rgb
    }

    /// Palette indices, one per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color at (x, y), or `None` out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index_at(x, y)
            .map(|idx| self.palette.color(idx as usize))
    }

    /// Palette index at (x, y), or `None` out of bounds.
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices.get(y * self.width + x).copied()
    }

    /// Pixel count per palette entry, in palette order.
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }
}
