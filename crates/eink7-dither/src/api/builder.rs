//! Ditherer builder -- the primary ergonomic entry point for the crate.
//!
//! [`Ditherer`] bundles a matcher (palette + color cache) with
//! [`DitherOptions`] and an optional [`Enhance`] step.

use std::borrow::Cow;
use std::time::Instant;

use super::error::DitherError;
use crate::dither::{dither_with_kernel, quantize_with, DitherOptions, Kernel, KernelKind};
use crate::matcher::{CacheStats, CallCounter, NearestColor, PaletteMatcher};
use crate::output::DitheredImage;
use crate::palette::Palette;
use crate::preprocess::Enhance;
use crate::shape::Shape;

/// Reusable dithering engine.
///
/// # Design
///
/// - Generic over the [`NearestColor`] matcher; the default
///   [`PaletteMatcher`] owns its cache, a [`SharedMatcher`](crate::SharedMatcher)
///   shares one across threads
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&mut self`: the color cache carries
///   over from one image to the next until [`reset_cache`](Self::reset_cache)
/// - The caller's pixel buffer is never modified
///
/// # Example
///
/// ```
/// use eink7_dither::{Ditherer, KernelKind, Shape};
///
/// let mut ditherer = Ditherer::eink7().kernel(KernelKind::JarvisJudiceNinke);
///
/// let pixels = vec![128.0; 2 * 2 * 3];
/// let result = ditherer.dither(&pixels, Shape::rgb(2, 2)).unwrap();
///
/// assert_eq!(result.width(), 2);
/// assert_eq!(result.rgb().len(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer<M = PaletteMatcher> {
    matcher: M,
    options: DitherOptions,
    enhance: Enhance,
}

impl Ditherer<PaletteMatcher> {
    /// Ditherer over `palette` with a fresh cache and default options.
    pub fn new(palette: Palette) -> Self {
        Self::with_matcher(PaletteMatcher::new(palette))
    }

    /// Ditherer over the default seven-color palette.
    pub fn eink7() -> Self {
        Self::new(Palette::eink7())
    }

    /// Forget every memoized color.
    pub fn reset_cache(&mut self) {
        self.matcher.reset_cache();
    }
}

impl Default for Ditherer<PaletteMatcher> {
    fn default() -> Self {
        Self::eink7()
    }
}

impl<M: NearestColor> Ditherer<M> {
    /// Ditherer driven by any matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            options: DitherOptions::default(),
            enhance: Enhance::default(),
        }
    }

    /// Select the diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: KernelKind) -> Self {
        self.options.kernel = kernel;
        self
    }

    /// Enable or disable serpentine scanning.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options.serpentine = enabled;
        self
    }

    /// Replace all dither options at once.
    #[inline]
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    /// Enhancement applied to a copy of the input before dithering.
    #[inline]
    pub fn enhance(mut self, enhance: Enhance) -> Self {
        self.enhance = enhance;
        self
    }

    pub fn dither_options(&self) -> &DitherOptions {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        self.matcher.palette()
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.matcher
    }

    pub fn into_matcher(self) -> M {
        self.matcher
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.matcher.cache_stats()
    }

    /// Dither an H×W×3 float RGB buffer with the configured kernel.
    ///
    /// Values are nominally 0.0..=255.0; anything outside is clamped.
    ///
    /// # Errors
    ///
    /// [`DitherError::Shape`] if `pixels` does not match `shape`. Nothing is
    /// processed in that case.
    pub fn dither(&mut self, pixels: &[f32], shape: Shape) -> Result<DitheredImage, DitherError> {
        let kernel = self.options.kernel.kernel();
        self.dither_with_kernel(pixels, shape, kernel)
    }

    /// Dither with an explicit kernel, e.g. a custom [`Kernel::new`] table.
    ///
    /// The serpentine setting still applies; the configured kernel kind is
    /// ignored.
    pub fn dither_with_kernel(
        &mut self,
        pixels: &[f32],
        shape: Shape,
        kernel: &Kernel,
    ) -> Result<DitheredImage, DitherError> {
        shape.validate(pixels.len())?;
        let pixels = self.prepare(pixels, shape)?;

        let started = Instant::now();
        let mut counter = CallCounter::new(&mut self.matcher);

        let image = dither_with_kernel(
            &pixels,
            shape.width,
            shape.height,
            &mut counter,
            kernel,
            self.options.serpentine,
        );

        let stats = counter.cache_stats();
        tracing::debug!(
            width = shape.width,
            height = shape.height,
            kernel = kernel.name(),
            serpentine = self.options.serpentine,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            cache_entries = stats.entries,
            hit_rate = stats.hit_rate(),
            "Dithered image"
        );

        Ok(image)
    }

    /// Dither 8-bit RGB bytes (`width * height * 3` long).
    pub fn dither_rgb8(
        &mut self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DitheredImage, DitherError> {
        let shape = Shape::rgb(width, height);
        shape.validate(pixels.len())?;
        let floats: Vec<f32> = pixels.iter().map(|&v| f32::from(v)).collect();
        self.dither(&floats, shape)
    }

    /// Map every pixel to its nearest palette color without diffusing
    /// error.
    pub fn quantize(&mut self, pixels: &[f32], shape: Shape) -> Result<DitheredImage, DitherError> {
        shape.validate(pixels.len())?;
        let pixels = self.prepare(pixels, shape)?;

        let started = Instant::now();
        let mut counter = CallCounter::new(&mut self.matcher);
        let image = quantize_with(&pixels, shape.width, shape.height, &mut counter);
        let stats = counter.cache_stats();

        tracing::debug!(
            width = shape.width,
            height = shape.height,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            hit_rate = stats.hit_rate(),
            "Quantized image"
        );

        Ok(image)
    }

    fn prepare<'a>(&self, pixels: &'a [f32], shape: Shape) -> Result<Cow<'a, [f32]>, DitherError> {
        if self.enhance.is_identity() {
            return Ok(Cow::Borrowed(pixels));
        }
        Ok(Cow::Owned(self.enhance.enhanced(pixels, shape)?))
    }
}

/// One-shot dithering over `palette` with serpentine scanning.
///
/// Uses a fresh cache for this call only; keep a [`Ditherer`] around to
/// reuse the cache across images.
///
/// # Example
///
/// ```
/// use eink7_dither::{dither, KernelKind, Palette, Shape};
///
/// let pixels = [0.0, 0.0, 0.0, 128.0, 128.0, 128.0];
/// let out = dither(&pixels, Shape::rgb(2, 1), KernelKind::FloydSteinberg, &Palette::eink7()).unwrap();
/// assert_eq!(out.rgb(), &[0, 0, 0, 255, 255, 255]);
/// ```
pub fn dither(
    pixels: &[f32],
    shape: Shape,
    kernel: KernelKind,
    palette: &Palette,
) -> Result<DitheredImage, DitherError> {
    Ditherer::new(palette.clone()).kernel(kernel).dither(pixels, shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::dither::Tap;
    use crate::shape::ShapeError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let ditherer = Ditherer::eink7();
        assert_eq!(ditherer.dither_options(), &DitherOptions::default());
        assert_eq!(ditherer.palette().len(), 7);
    }

    #[test]
    fn test_builder_chaining() {
        let ditherer = Ditherer::default()
            .kernel(KernelKind::JarvisJudiceNinke)
            .serpentine(false);
        assert_eq!(
            ditherer.dither_options(),
            &DitherOptions::new()
                .kernel(KernelKind::JarvisJudiceNinke)
                .serpentine(false)
        );
    }

    #[test]
    fn test_cache_persists_across_calls() {
        let mut ditherer = Ditherer::eink7();
        let pixels = vec![255.0, 0.0, 0.0, 255.0, 0.0, 0.0];
        ditherer.dither(&pixels, Shape::rgb(2, 1)).unwrap();
        ditherer.dither(&pixels, Shape::rgb(2, 1)).unwrap();

        let stats = ditherer.cache_stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 3);

        ditherer.reset_cache();
        assert_eq!(ditherer.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_shape_rejected_before_any_work() {
        let mut ditherer = Ditherer::eink7();
        let err = ditherer.dither(&[0.0; 10], Shape::rgb(2, 2)).unwrap_err();
        assert_eq!(
            err,
            DitherError::Shape(ShapeError::LengthMismatch {
                width: 2,
                height: 2,
                expected: 12,
                actual: 10
            })
        );
        assert_eq!(ditherer.cache_stats().lookups(), 0);

        let err = ditherer.dither(&[0.0; 16], Shape::new(2, 2, 4)).unwrap_err();
        assert_eq!(err, DitherError::Shape(ShapeError::Channels(4)));
    }

    #[test]
    fn test_dither_rgb8_matches_float_path() {
        let bytes: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 29 % 256) as u8).collect();
        let floats: Vec<f32> = bytes.iter().map(|&v| f32::from(v)).collect();

        let from_bytes = Ditherer::eink7().dither_rgb8(&bytes, 4, 3).unwrap();
        let from_floats = Ditherer::eink7().dither(&floats, Shape::rgb(4, 3)).unwrap();
        assert_eq!(from_bytes, from_floats);

        assert!(Ditherer::eink7().dither_rgb8(&bytes, 4, 4).is_err());
    }

    #[test]
    fn test_custom_kernel() {
        // Everything straight down: row 0 never receives error
        let kernel = Kernel::new("down", vec![Tap::new(0, 1, 1)], 1).unwrap();
        let pixels = vec![100.0; 2 * 2 * 3];
        let image = Ditherer::eink7()
            .dither_with_kernel(&pixels, Shape::rgb(2, 2), &kernel)
            .unwrap();
        // Row 0: 100 gray → black each, error 100 pushed down: 200 → white
        assert_eq!(image.indices(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_quantize_has_no_diffusion() {
        let pixels = vec![100.0; 2 * 3];
        let image = Ditherer::eink7().quantize(&pixels, Shape::rgb(2, 1)).unwrap();
        assert_eq!(image.indices(), &[0, 0]);
    }

    #[test]
    fn test_enhance_applies_to_copy() {
        let pixels = vec![100.0, 100.0, 100.0];
        let before = pixels.clone();
        let mut ditherer = Ditherer::eink7().enhance(Enhance::new().brightness(2.0));
        let image = ditherer.dither(&pixels, Shape::rgb(1, 1)).unwrap();
        // 200 gray is white; the unenhanced pixel would be black
        assert_eq!(image.pixel(0, 0), Some(Rgb::new(255, 255, 255)));
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_free_function_matches_ditherer() {
        let pixels: Vec<f32> = (0..5 * 5 * 3).map(|i| (i * 13 % 256) as f32).collect();
        let palette = Palette::eink7();
        for kind in KernelKind::ALL {
            let one_shot = dither(&pixels, Shape::rgb(5, 5), kind, &palette).unwrap();
            let reused = Ditherer::eink7()
                .kernel(kind)
                .dither(&pixels, Shape::rgb(5, 5))
                .unwrap();
            assert_eq!(one_shot, reused);
        }
    }
}
