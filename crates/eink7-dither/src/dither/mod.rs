//! Error diffusion dithering.
//!
//! # Algorithm
//!
//! Rows are visited top to bottom; with serpentine scanning odd rows run
//! right-to-left and every tap's `dx` is mirrored. At each pixel:
//!
//! 1. The working value (input plus diffused error, kept within 0..=255)
//!    is rounded to an 8-bit color.
//! 2. The matcher resolves it to a palette entry, which is written to the
//!    output.
//! 3. The error `working - palette` is spread to the kernel's neighbors;
//!    targets outside the image are skipped, every target is clamped back
//!    into 0..=255 after the addition.
//!
//! Taps never reach a visited pixel, so each pixel is decided exactly once.

mod kernel;
mod options;
mod quantize;

pub use kernel::*;
pub use options::DitherOptions;
pub(crate) use quantize::quantize_with;

use crate::color::Rgb;
use crate::matcher::NearestColor;
use crate::output::DitheredImage;

/// Clamp a working channel into 0..=255; NaN becomes 0.
#[inline]
pub(crate) fn sanitize_channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

/// Sliding window over the working image.
///
/// Holds only the rows the kernel can reach (`max_dy + 1`). Rows are loaded
/// from the caller's buffer, sanitized, as they enter the window, so the
/// input is never written to.
///
/// # Usage Pattern
///
/// 1. Create with `new(source, width, height, row_depth)`
/// 2. For each row:
///    a. Read the working value with `get(x)`
///    b. Spread error with `diffuse(x, dy, error, weight)`
///    c. After the row is complete, call `advance_row()`
#[derive(Debug)]
pub(crate) struct WorkingRows<'a> {
    source: &'a [f32],
    width: usize,
    height: usize,
    /// rows[0] is the current row, rows[1] the next, etc.
    rows: Vec<Vec<[f32; 3]>>,
    /// Source row that the next `advance_row` loads
    next_row: usize,
}

impl<'a> WorkingRows<'a> {
    pub fn new(source: &'a [f32], width: usize, height: usize, row_depth: usize) -> Self {
        let mut window = Self {
            source,
            width,
            height,
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            next_row: 0,
        };
        for slot in 0..row_depth {
            window.load_into(slot);
        }
        window
    }

    fn load_into(&mut self, slot: usize) {
        let y = self.next_row;
        self.next_row += 1;
        let row = &mut self.rows[slot];
        if y >= self.height {
            row.fill([0.0; 3]);
            return;
        }
        let start = y * self.width * 3;
        let src = &self.source[start..start + self.width * 3];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(3)) {
            *dst = [
                sanitize_channel(px[0]),
                sanitize_channel(px[1]),
                sanitize_channel(px[2]),
            ];
        }
    }

    /// Working value of pixel `x` on the current row.
    #[inline]
    pub fn get(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add `error * weight` to pixel `x` of row `row_offset` (0 = current)
    /// and clamp the result.
    ///
    /// Silently ignores coordinates outside the window.
    #[inline]
    pub fn diffuse(&mut self, x: usize, row_offset: usize, error: [f32; 3], weight: f32) {
        if x < self.width && row_offset < self.rows.len() {
            let target = &mut self.rows[row_offset][x];
            for c in 0..3 {
                target[c] = (target[c] + error[c] * weight).clamp(0.0, 255.0);
            }
        }
    }

    /// Move to the next row: the current row is dropped, later rows shift
    /// forward and the next source row is loaded at the end.
    pub fn advance_row(&mut self) {
        // Rotate left: [0,1,2] -> [1,2,0]
        self.rows.rotate_left(1);
        let last = self.rows.len() - 1;
        self.load_into(last);
    }
}

/// Core error diffusion loop, parameterized by kernel.
///
/// `pixels` must already be validated as `width * height * 3` values.
/// Returns an empty image when either dimension is zero.
pub(crate) fn dither_with_kernel<M: NearestColor + ?Sized>(
    pixels: &[f32],
    width: usize,
    height: usize,
    matcher: &mut M,
    kernel: &Kernel,
    serpentine: bool,
) -> DitheredImage {
    let palette = matcher.palette().clone();
    if width == 0 || height == 0 {
        return DitheredImage::from_parts(Vec::new(), Vec::new(), width, height, palette);
    }

    let mut rgb = vec![0u8; width * height * 3];
    let mut indices = vec![0u8; width * height];

    let taps: Vec<(i32, usize, f32)> = kernel
        .taps()
        .iter()
        .map(|t| (t.dx, t.dy, kernel.weight(t) as f32))
        .collect();

    // Rows past the bottom edge never receive error
    let row_depth = kernel.max_dy().min(height - 1) + 1;
    let mut window = WorkingRows::new(pixels, width, height, row_depth);

    for y in 0..height {
        let reverse = serpentine && y % 2 == 1;

        let x_range: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let value = window.get(x);
            let current = Rgb::from_f32_clamped(value[0], value[1], value[2]);
            let palette_idx = matcher.nearest_index(current);
            let chosen = palette.color(palette_idx);

            let out = y * width + x;
            indices[out] = palette_idx as u8;
            rgb[out * 3..out * 3 + 3].copy_from_slice(&chosen.to_bytes());

            let target = chosen.to_f32();
            let error = [
                value[0] - target[0],
                value[1] - target[1],
                value[2] - target[2],
            ];
            if error == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in &taps {
                let effective_dx = if reverse { -dx } else { dx };
                let nx = x as isize + effective_dx as isize;
                if nx < 0 || nx as usize >= width || y + dy >= height {
                    continue;
                }
                window.diffuse(nx as usize, dy, error, weight);
            }
        }

        window.advance_row();
    }

    DitheredImage::from_parts(rgb, indices, width, height, palette)
}
