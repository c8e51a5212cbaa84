//! Nearest-color mapping without error diffusion.

use super::sanitize_channel;
use crate::color::Rgb;
use crate::matcher::NearestColor;
use crate::output::DitheredImage;

/// Map every pixel independently to its nearest palette color.
///
/// `pixels` must already be validated as `width * height * 3` values.
pub(crate) fn quantize_with<M: NearestColor + ?Sized>(
    pixels: &[f32],
    width: usize,
    height: usize,
    matcher: &mut M,
) -> DitheredImage {
    let palette = matcher.palette().clone();
    let mut rgb = Vec::with_capacity(pixels.len());
    let mut indices = Vec::with_capacity(pixels.len() / 3);

    for px in pixels.chunks_exact(3) {
        let color = Rgb::from_f32_clamped(
            sanitize_channel(px[0]),
            sanitize_channel(px[1]),
            sanitize_channel(px[2]),
        );
        let idx = matcher.nearest_index(color);
        indices.push(idx as u8);
        rgb.extend_from_slice(&palette.color(idx).to_bytes());
    }

    DitheredImage::from_parts(rgb, indices, width, height, palette)
}
