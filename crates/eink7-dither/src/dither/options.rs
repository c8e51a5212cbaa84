//! Dithering options and configuration.

use serde::{Deserialize, Serialize};

use super::kernel::KernelKind;

/// Configuration options for error diffusion dithering.
///
/// # Defaults
///
/// - Kernel: Floyd-Steinberg
/// - Serpentine scanning: enabled (odd rows run right-to-left with the
///   kernel mirrored, which breaks up directional "worm" artifacts)
///
/// # Example
///
/// ```
/// use eink7_dither::{DitherOptions, KernelKind};
///
/// let options = DitherOptions::new()
///     .kernel(KernelKind::JarvisJudiceNinke)
///     .serpentine(false);
/// assert!(!options.serpentine);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherOptions {
    /// Diffusion kernel.
    ///
    /// Default: `KernelKind::FloydSteinberg`
    pub kernel: KernelKind,

    /// Alternate row direction. Turning this off scans every row
    /// left-to-right; only useful for diagnostics.
    ///
    /// Default: `true`
    pub serpentine: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            kernel: KernelKind::default(),
            serpentine: true,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }
}
