pub mod png_io;

pub use png_io::{decode_png, encode_rgb8, read_png, write_png, RgbImage};
