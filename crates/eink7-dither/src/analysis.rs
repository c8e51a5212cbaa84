//! Image statistics and palette swatches.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::palette::Palette;
use crate::shape::{Shape, ShapeError};

/// A color and the number of pixels that have it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    pub count: usize,
}

/// The `top_n` most frequent colors of an 8-bit RGB buffer.
///
/// Sorted by count, most frequent first; equal counts are ordered by color
/// value so the result is deterministic.
///
/// # Example
///
/// ```
/// use eink7_dither::{color_histogram, Rgb, Shape};
///
/// let pixels = [9, 9, 9, 1, 1, 1, 9, 9, 9];
/// let top = color_histogram(&pixels, Shape::rgb(3, 1), 5).unwrap();
/// assert_eq!(top[0].color, Rgb::new(9, 9, 9));
/// assert_eq!(top[0].count, 2);
/// assert_eq!(top.len(), 2);
/// ```
pub fn color_histogram(
    pixels: &[u8],
    shape: Shape,
    top_n: usize,
) -> Result<Vec<ColorCount>, ShapeError> {
    shape.validate(pixels.len())?;

    let mut counts: HashMap<Rgb, usize> = HashMap::new();
    for px in pixels.chunks_exact(3) {
        *counts.entry(Rgb::new(px[0], px[1], px[2])).or_default() += 1;
    }

    let mut ranked: Vec<ColorCount> = counts
        .into_iter()
        .map(|(color, count)| ColorCount { color, count })
        .collect();
    ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Render the palette as equal-width vertical bands, left to right.
///
/// Band width is `width / palette.len()`; leftover columns on the right
/// stay white. Returns `width * height * 3` RGB bytes.
///
/// # Example
///
/// ```
/// use eink7_dither::{palette_preview, Palette};
///
/// let swatch = palette_preview(&Palette::eink7(), 15, 1);
/// assert_eq!(&swatch[0..3], &[0, 0, 0]);          // black band
/// assert_eq!(&swatch[12 * 3..13 * 3], &[255, 165, 0]); // orange band
/// assert_eq!(&swatch[14 * 3..], &[255, 255, 255]); // remainder
/// ```
pub fn palette_preview(palette: &Palette, width: usize, height: usize) -> Vec<u8> {
    const BACKGROUND: Rgb = Rgb::new(255, 255, 255);

    let band = width / palette.len();
    let row: Vec<u8> = (0..width)
        .flat_map(|x| {
            let color = match x.checked_div(band) {
                Some(idx) if idx < palette.len() => palette.color(idx),
                _ => BACKGROUND,
            };
            color.to_bytes()
        })
        .collect();

    row.repeat(height)
}

/// Place `original` and `dithered` side by side, original on the left.
///
/// Both buffers must be `width x height` RGB. The result is
/// `2 * width x height` RGB bytes.
///
/// # Example
///
/// ```
/// use eink7_dither::comparison;
///
/// let side_by_side = comparison(&[10, 20, 30], &[0, 0, 0], 1, 1).unwrap();
/// assert_eq!(side_by_side, vec![10, 20, 30, 0, 0, 0]);
/// ```
pub fn comparison(
    original: &[u8],
    dithered: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, ShapeError> {
    let shape = Shape::rgb(width, height);
    shape.validate(original.len())?;
    shape.validate(dithered.len())?;

    let mut out = Vec::with_capacity(original.len() * 2);
    if width == 0 {
        return Ok(out);
    }
    let stride = width * 3;
    for (left, right) in original.chunks_exact(stride).zip(dithered.chunks_exact(stride)) {
        out.extend_from_slice(left);
        out.extend_from_slice(right);
    }
    Ok(out)
}
