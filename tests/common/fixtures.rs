//! Test fixtures: synthetic images and CLI invocation.

use std::path::Path;
use std::process::{Command, Output};

/// Horizontal gray ramp with a red-to-blue vertical tint, 8-bit RGB.
pub fn gradient(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let gray = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            let tint = (y * 255 / height.saturating_sub(1).max(1)) as u8;
            pixels.extend_from_slice(&[gray.max(255 - tint), gray, gray.max(tint)]);
        }
    }
    pixels
}

/// Write an 8-bit RGBA PNG.
pub fn write_rgba_png(path: &Path, width: u32, height: u32, rgba: &[u8]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(rgba).unwrap();
}

/// Run the `sevenink` binary with `args`, no config from the environment.
pub fn sevenink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sevenink"))
        .args(args)
        .env_remove("SEVENINK_CONFIG")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}
