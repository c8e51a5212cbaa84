//! Sevenink - dither images for seven-color e-ink panels
//!
//! PNG and YAML plumbing around the `eink7-dither` engine.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
