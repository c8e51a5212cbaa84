//! High-level API: the [`Ditherer`] builder, batch dithering and the
//! unified [`DitherError`].

mod batch;
mod builder;
mod error;

pub use batch::{dither_batch, ImageRef};
pub use builder::{dither, Ditherer};
pub use error::DitherError;
