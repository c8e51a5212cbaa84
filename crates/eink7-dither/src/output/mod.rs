//! Output types for dithered images.

mod dithered_image;

pub use dithered_image::DitheredImage;
