//! PNG decoding to 8-bit RGB and encoding of dithered output.

use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::ImageError;

/// An 8-bit RGB image, rows top to bottom, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Decode any PNG into 8-bit RGB.
///
/// Gray, gray+alpha, RGB, RGBA and palette images at any bit depth are
/// accepted. 16-bit samples keep their high byte. Alpha is dropped without
/// compositing, with a warning.
pub fn decode_png<R: Read>(reader: R) -> Result<RgbImage, ImageError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let width = info.width as usize;
    let height = info.height as usize;
    let pixel_count = width
        .checked_mul(height)
        .ok_or(ImageError::TooLarge { width, height })?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedFormat {
            color_type: info.color_type,
            bit_depth: info.bit_depth,
        });
    }

    let pixels = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => {
            tracing::warn!(width, height, "Discarding alpha channel");
            buf.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect()
        }
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => {
            tracing::warn!(width, height, "Discarding alpha channel");
            buf.chunks_exact(2).flat_map(|px| [px[0], px[0], px[0]]).collect()
        }
        color_type => {
            return Err(ImageError::UnsupportedFormat {
                color_type,
                bit_depth: info.bit_depth,
            })
        }
    };
    debug_assert_eq!(pixels.len(), pixel_count * 3);

    tracing::debug!(
        width,
        height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbImage, ImageError> {
    let file = std::fs::File::open(path)?;
    decode_png(std::io::BufReader::new(file))
}

/// Encode 8-bit RGB pixels as a PNG.
pub fn encode_rgb8(width: usize, height: usize, pixels: &[u8]) -> Result<Vec<u8>, ImageError> {
    let too_large = || ImageError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
    }
    Ok(buf.into_inner())
}

/// Encode and write 8-bit RGB pixels to `path`; returns the byte count.
pub fn write_png(
    path: &Path,
    width: usize,
    height: usize,
    pixels: &[u8],
) -> Result<usize, ImageError> {
    let bytes = encode_rgb8(width, height, pixels)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}
