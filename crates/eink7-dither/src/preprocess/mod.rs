//! Image preprocessing applied before dithering.
//!
//! Currently a single operation, [`Enhance`], which boosts saturation,
//! contrast and brightness to compensate for the muted gamut of e-ink
//! panels. Enhancement works on the same `f32` RGB buffers the dither
//! engine consumes, so the output can be passed straight to
//! [`Ditherer::dither`](crate::Ditherer::dither).

mod enhance;

pub use enhance::Enhance;
