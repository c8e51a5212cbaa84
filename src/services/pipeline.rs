use std::path::Path;
use std::time::Instant;

use eink7_dither::{
    color_histogram, comparison, palette_preview, CacheStats, ColorCount, DitherError, DitheredImage,
    Ditherer, DitherOptions, Enhance, Palette, Shape,
};

use crate::error::{ConfigError, ImageError};
use crate::models::AppConfig;
use crate::rendering::png_io::{self, RgbImage};

/// How pixels are mapped to the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Error diffusion with the configured kernel
    Dither,
    /// Nearest color per pixel, no diffusion
    Quantize,
}

/// Summary of one processed file
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub width: usize,
    pub height: usize,
    /// Encoded PNG size in bytes
    pub bytes: usize,
    /// Pixels per palette entry
    pub color_counts: Vec<usize>,
    /// Cache activity during this file only
    pub cache: CacheStats,
    pub elapsed_ms: f64,
}

/// PNG in, palette-mapped PNG out.
///
/// One pipeline keeps its color cache across files, so processing a batch
/// of similar images gets cheaper after the first.
pub struct ImagePipeline {
    ditherer: Ditherer,
}

impl ImagePipeline {
    pub fn new(palette: Palette, options: DitherOptions, enhance: Option<Enhance>) -> Self {
        let ditherer = Ditherer::new(palette)
            .options(options)
            .enhance(enhance.unwrap_or_default());
        Self { ditherer }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.palette()?,
            config.dither_options(),
            config.enhance,
        ))
    }

    pub fn palette(&self) -> &Palette {
        self.ditherer.palette()
    }

    /// Map a decoded image onto the palette.
    pub fn process(&mut self, image: &RgbImage, mode: Mode) -> Result<DitheredImage, ImageError> {
        let shape = Shape::rgb(image.width, image.height);
        let floats: Vec<f32> = image.pixels.iter().map(|&v| f32::from(v)).collect();
        let result = match mode {
            Mode::Dither => self.ditherer.dither(&floats, shape)?,
            Mode::Quantize => self.ditherer.quantize(&floats, shape)?,
        };
        Ok(result)
    }

    /// Read `input`, map it onto the palette and write the result to `output`.
    ///
    /// With `compare`, also write the input and the result side by side to
    /// that path.
    pub fn process_file(
        &mut self,
        input: &Path,
        output: &Path,
        mode: Mode,
        compare: Option<&Path>,
    ) -> Result<PipelineReport, ImageError> {
        let started = Instant::now();
        let image = png_io::read_png(input)?;

        let before = self.ditherer.cache_stats();
        let result = self.process(&image, mode)?;
        let cache = self.ditherer.cache_stats().since(&before);

        let bytes = png_io::write_png(output, result.width(), result.height(), result.rgb())?;
        if let Some(compare) = compare {
            let pixels = comparison(&image.pixels, result.rgb(), image.width, image.height)
                .map_err(DitherError::from)?;
            let compare_bytes = png_io::write_png(compare, image.width * 2, image.height, &pixels)?;
            tracing::debug!(
                path = %compare.display(),
                bytes = compare_bytes,
                "Wrote comparison"
            );
        }
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            ?mode,
            width = result.width(),
            height = result.height(),
            bytes,
            elapsed_ms,
            "Processed image"
        );

        Ok(PipelineReport {
            width: result.width(),
            height: result.height(),
            bytes,
            color_counts: result.color_counts(),
            cache,
            elapsed_ms,
        })
    }
}

/// The `top_n` most common colors of a PNG file.
pub fn analyze_file(input: &Path, top_n: usize) -> Result<(RgbImage, Vec<ColorCount>), ImageError> {
    let image = png_io::read_png(input)?;
    let shape = Shape::rgb(image.width, image.height);
    let top = color_histogram(&image.pixels, shape, top_n).map_err(DitherError::from)?;
    Ok((image, top))
}

/// Write a swatch of `palette` as vertical bands.
pub fn write_preview(
    palette: &Palette,
    output: &Path,
    width: usize,
    height: usize,
) -> Result<usize, ImageError> {
    let pixels = palette_preview(palette, width, height);
    png_io::write_png(output, width, height, &pixels)
}
