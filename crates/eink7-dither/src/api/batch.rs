//! Parallel dithering of independent images.
//!
//! Error diffusion within one image is a strict sequential chain, so the
//! parallelism is across images: each image is one sequential pass on a
//! rayon worker, and all workers share a single [`SharedMatcher`].

use rayon::prelude::*;

use super::builder::Ditherer;
use super::error::DitherError;
use crate::dither::DitherOptions;
use crate::matcher::SharedMatcher;
use crate::output::DitheredImage;
use crate::shape::Shape;

/// A borrowed input image.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pub pixels: &'a [f32],
    pub shape: Shape,
}

impl<'a> ImageRef<'a> {
    pub fn new(pixels: &'a [f32], shape: Shape) -> Self {
        Self { pixels, shape }
    }
}

/// Dither every image in parallel, results in input order.
///
/// Each image succeeds or fails on its own; a shape error in one does not
/// affect the others.
///
/// # Example
///
/// ```
/// use eink7_dither::{dither_batch, DitherOptions, ImageRef, Palette, Shape, SharedMatcher};
///
/// let matcher = SharedMatcher::new(Palette::eink7());
/// let a = vec![0.0; 4 * 3];
/// let b = vec![255.0; 2 * 3];
/// let images = [ImageRef::new(&a, Shape::rgb(2, 2)), ImageRef::new(&b, Shape::rgb(2, 1))];
///
/// let results = dither_batch(&matcher, DitherOptions::new(), &images);
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
pub fn dither_batch(
    matcher: &SharedMatcher,
    options: DitherOptions,
    images: &[ImageRef<'_>],
) -> Vec<Result<DitheredImage, DitherError>> {
    tracing::debug!(images = images.len(), kernel = %options.kernel, "Dithering batch");

    images
        .par_iter()
        .map(|image| {
            Ditherer::with_matcher(matcher.clone())
                .options(options)
                .dither(image.pixels, image.shape)
        })
        .collect()
}
