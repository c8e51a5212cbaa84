//! Palette struct with Lab values baked in and nearest-color search.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::eink::EinkColor;
use super::error::PaletteError;
use crate::color::{Lab, Rgb};

/// Largest palette an 8-bit index map can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// Distance metric for palette color matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    /// Lightness, chroma and hue differences without CIEDE2000's weighting
    /// functions. See [`Lab::delta_e`].
    #[default]
    SimplifiedCiede2000,
    /// Plain Euclidean distance in Lab. See [`Lab::delta_e_cie76`].
    Cie76,
    /// Euclidean distance on the raw 8-bit channels, no Lab conversion.
    /// Cheap but ignores perception: dark grays drift toward black.
    Rgb,
}

impl DistanceMetric {
    /// Canonical kebab-case name, as used in config files.
    pub const fn name(self) -> &'static str {
        match self {
            DistanceMetric::SimplifiedCiede2000 => "simplified-ciede2000",
            DistanceMetric::Cie76 => "cie76",
            DistanceMetric::Rgb => "rgb",
        }
    }

    /// Distance between two colors under this metric.
    #[inline]
    pub fn distance(self, a: Rgb, b: Rgb) -> f64 {
        match self {
            DistanceMetric::SimplifiedCiede2000 => Lab::from(a).delta_e(Lab::from(b)),
            DistanceMetric::Cie76 => Lab::from(a).delta_e_cie76(Lab::from(b)),
            DistanceMetric::Rgb => a.euclidean_distance(b),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = PaletteError;

    /// Accepts the canonical names plus `ciede2000` and `simple` (for
    /// `rgb`). Case, `_` vs `-` and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "simplified-ciede2000" | "ciede2000" => Ok(DistanceMetric::SimplifiedCiede2000),
            "cie76" => Ok(DistanceMetric::Cie76),
            "rgb" | "simple" => Ok(DistanceMetric::Rgb),
            _ => Err(PaletteError::UnknownMetric(s.to_string())),
        }
    }
}

/// An ordered, immutable set of output colors.
///
/// Every entry is converted to Lab once at construction, so per-pixel
/// matching only converts the input color. Entry order matters only as a
/// tie-break: when two entries are equally close, the lower index wins.
///
/// # Example
///
/// ```
/// use eink7_dither::{Palette, Rgb};
///
/// let colors = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
/// let palette = Palette::new(&colors).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    labs: Vec<Lab>,
    names: Vec<Option<&'static str>>,
    distance_metric: DistanceMetric,
}

impl Palette {
    /// Create a palette from sRGB colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] beyond [`MAX_PALETTE_LEN`] entries
    /// - [`PaletteError::DuplicateColor`] if any color appears twice
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_LEN {
            return Err(PaletteError::TooManyColors {
                len: colors.len(),
                max: MAX_PALETTE_LEN,
            });
        }

        let mut seen = HashSet::with_capacity(colors.len());
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self::from_validated(colors.to_vec(), vec![None; colors.len()]))
    }

    fn from_validated(colors: Vec<Rgb>, names: Vec<Option<&'static str>>) -> Self {
        let labs = colors.iter().map(|&c| Lab::from(c)).collect();
        Self {
            colors,
            labs,
            names,
            distance_metric: DistanceMetric::default(),
        }
    }

    /// The default seven-color panel palette: black, white, green, blue,
    /// red, yellow, orange, in that order.
    ///
    /// # Example
    ///
    /// ```
    /// use eink7_dither::{EinkColor, Palette};
    ///
    /// let palette = Palette::eink7();
    /// assert_eq!(palette.len(), 7);
    /// assert_eq!(palette.color(6), EinkColor::Orange.rgb());
    /// assert_eq!(palette.name(6), Some("orange"));
    /// ```
    pub fn eink7() -> Self {
        let colors = EinkColor::ALL.iter().map(|c| c.rgb()).collect();
        let names = EinkColor::ALL.iter().map(|c| Some(c.name())).collect();
        Self::from_validated(colors, names)
    }

    /// Create a palette from hex color strings such as `"#FFA500"` or `"#F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid,
    /// or other [`PaletteError`] variants for palette validation failures.
    ///
    /// # Example
    ///
    /// ```
    /// use eink7_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFF", "#FF0000"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .map(|s| Rgb::from_str(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&colors)
    }

    /// Set the distance metric used by [`find_nearest`](Self::find_nearest).
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// The distance metric in use.
    #[inline]
    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// sRGB color at `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Precomputed Lab value at `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.labs[idx]
    }

    /// Display name of the entry at `idx`, if it has one.
    pub fn name(&self, idx: usize) -> Option<&'static str> {
        self.names.get(idx).copied().flatten()
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index of an exact palette color.
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Find the palette entry closest to `color`.
    ///
    /// Linear scan in palette order with a strict `<` comparison, so the
    /// first of several equally distant entries wins. Lab metrics compare
    /// against the precomputed Lab entries; [`DistanceMetric::Rgb`] compares
    /// the raw channels. Returns the index and its distance.
    ///
    /// # Example
    ///
    /// ```
    /// use eink7_dither::{Palette, Rgb};
    ///
    /// let palette = Palette::eink7();
    /// let (idx, _) = palette.find_nearest(Rgb::new(250, 160, 10));
    /// assert_eq!(idx, 6); // orange
    /// ```
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> (usize, f64) {
        match self.distance_metric {
            DistanceMetric::SimplifiedCiede2000 => {
                let lab = Lab::from(color);
                self.scan(|i| lab.delta_e(self.labs[i]))
            }
            DistanceMetric::Cie76 => {
                let lab = Lab::from(color);
                self.scan(|i| lab.delta_e_cie76(self.labs[i]))
            }
            DistanceMetric::Rgb => self.scan(|i| color.euclidean_distance(self.colors[i])),
        }
    }

    #[inline]
    fn scan(&self, distance: impl Fn(usize) -> f64) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for i in 0..self.colors.len() {
            let dist = distance(i);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::eink7()
    }
}
