//! Error diffusion kernel definitions.
//!
//! A kernel is a table of taps, each an offset to a not-yet-visited
//! neighbor plus an integer numerator; the fraction of error a neighbor
//! receives is `numerator / divisor`. The engine mirrors `dx` on
//! right-to-left rows and never mirrors `dy`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One neighbor of an error diffusion kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    /// Horizontal offset (positive = ahead in scan direction)
    pub dx: i32,
    /// Row offset (0 = current row)
    pub dy: usize,
    /// Numerator of this neighbor's share
    pub weight: u16,
}

impl Tap {
    pub const fn new(dx: i32, dy: usize, weight: u16) -> Self {
        Self { dx, dy, weight }
    }
}

/// Error type for kernel construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("kernel must have at least one tap")]
    Empty,
    #[error("kernel divisor must be non-zero")]
    ZeroDivisor,
    #[error("kernel weights sum to {sum}, expected the divisor {divisor}")]
    WeightSum { sum: u32, divisor: u16 },
    /// A tap on the current row that does not point ahead of the cursor
    #[error("tap {index} on the current row must have dx > 0")]
    NotAhead { index: usize },
    /// A tap reaching further than [`Kernel::MAX_OFFSET`] in either direction
    #[error("tap {index} offset is out of range (|dx| and dy must be at most {max})", max = Kernel::MAX_OFFSET)]
    OffsetOutOfRange { index: usize },
    #[error("unknown kernel {0:?} (expected floyd-steinberg or jarvis-judice-ninke)")]
    UnknownName(String),
}

/// An error diffusion kernel.
///
/// Every kernel that exists is valid: numerators sum to the divisor (all
/// error is propagated) and taps on the current row point strictly ahead,
/// so a pixel is never revisited.
///
/// # Buffer Sizing
///
/// [`max_dy`](Self::max_dy) is how many rows ahead the kernel reaches; the
/// engine keeps `max_dy + 1` working rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    name: Cow<'static, str>,
    taps: Cow<'static, [Tap]>,
    divisor: u16,
    max_dy: usize,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub static FLOYD_STEINBERG: Kernel = Kernel {
    name: Cow::Borrowed("floyd-steinberg"),
    taps: Cow::Borrowed(&[
        Tap::new(1, 0, 7),  // right
        Tap::new(-1, 1, 3), // bottom-left
        Tap::new(0, 1, 5),  // bottom
        Tap::new(1, 1, 1),  // bottom-right
    ]),
    divisor: 16,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke dithering kernel.
///
/// Distributes error to 12 neighbors over 3 rows (48/48). Smoother
/// gradients than Floyd-Steinberg at roughly three times the work.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub static JARVIS_JUDICE_NINKE: Kernel = Kernel {
    name: Cow::Borrowed("jarvis-judice-ninke"),
    taps: Cow::Borrowed(&[
        Tap::new(1, 0, 7),
        Tap::new(2, 0, 5),
        Tap::new(-2, 1, 3),
        Tap::new(-1, 1, 5),
        Tap::new(0, 1, 7),
        Tap::new(1, 1, 5),
        Tap::new(2, 1, 3),
        Tap::new(-2, 2, 1),
        Tap::new(-1, 2, 3),
        Tap::new(0, 2, 5),
        Tap::new(1, 2, 3),
        Tap::new(2, 2, 1),
    ]),
    divisor: 48,
    max_dy: 2,
};

impl Kernel {
    /// Largest `|dx|` and `dy` a custom tap may use.
    pub const MAX_OFFSET: usize = u16::MAX as usize;

    /// Build a custom kernel, validating it.
    ///
    /// # Errors
    ///
    /// - [`KernelError::Empty`] without taps
    /// - [`KernelError::ZeroDivisor`] for a zero divisor
    /// - [`KernelError::WeightSum`] if the numerators don't add up to `divisor`
    /// - [`KernelError::NotAhead`] for a `dy == 0` tap with `dx <= 0`
    /// - [`KernelError::OffsetOutOfRange`] if `|dx|` or `dy` exceeds
    ///   [`MAX_OFFSET`](Self::MAX_OFFSET)
    ///
    /// # Example
    ///
    /// ```
    /// use eink7_dither::{Kernel, Tap};
    ///
    /// // "False Floyd-Steinberg"
    /// let kernel = Kernel::new(
    ///     "false-fs",
    ///     vec![Tap::new(1, 0, 3), Tap::new(0, 1, 3), Tap::new(1, 1, 2)],
    ///     8,
    /// ).unwrap();
    /// assert_eq!(kernel.max_dy(), 1);
    /// ```
    pub fn new(
        name: impl Into<String>,
        taps: Vec<Tap>,
        divisor: u16,
    ) -> Result<Self, KernelError> {
        if taps.is_empty() {
            return Err(KernelError::Empty);
        }
        if divisor == 0 {
            return Err(KernelError::ZeroDivisor);
        }
        if let Some(index) = taps
            .iter()
            .position(|t| {
                t.dx.unsigned_abs() as usize > Self::MAX_OFFSET || t.dy > Self::MAX_OFFSET
            })
        {
            return Err(KernelError::OffsetOutOfRange { index });
        }
        if let Some(index) = taps.iter().position(|t| t.dy == 0 && t.dx <= 0) {
            return Err(KernelError::NotAhead { index });
        }
        let sum: u32 = taps.iter().map(|t| u32::from(t.weight)).sum();
        if sum != u32::from(divisor) {
            return Err(KernelError::WeightSum { sum, divisor });
        }

        let max_dy = taps.iter().map(|t| t.dy).max().unwrap_or(0);
        Ok(Self {
            name: Cow::Owned(name.into()),
            taps: Cow::Owned(taps),
            divisor,
            max_dy,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    #[inline]
    pub fn divisor(&self) -> u16 {
        self.divisor
    }

    /// Deepest row offset any tap reaches.
    #[inline]
    pub fn max_dy(&self) -> usize {
        self.max_dy
    }

    /// Fraction of the error `tap` receives.
    #[inline]
    pub fn weight(&self, tap: &Tap) -> f64 {
        f64::from(tap.weight) / f64::from(self.divisor)
    }
}

/// The built-in kernels, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KernelKind {
    #[default]
    #[serde(alias = "fs", alias = "floyd_steinberg_7color")]
    FloydSteinberg,
    #[serde(alias = "jjn", alias = "jarvis_judice_ninke_7color")]
    JarvisJudiceNinke,
}

impl KernelKind {
    pub const ALL: [KernelKind; 2] = [KernelKind::FloydSteinberg, KernelKind::JarvisJudiceNinke];

    /// The tap table for this kind.
    pub fn kernel(self) -> &'static Kernel {
        match self {
            KernelKind::FloydSteinberg => &FLOYD_STEINBERG,
            KernelKind::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
        }
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            KernelKind::FloydSteinberg => "floyd-steinberg",
            KernelKind::JarvisJudiceNinke => "jarvis-judice-ninke",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelKind {
    type Err = KernelError;

    /// Accepts the canonical names, the short forms `fs` / `jjn`, and the
    /// `*_7color` method names. Case, `_` vs `-` and surrounding whitespace
    /// are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let base = normalized.strip_suffix("-7color").unwrap_or(&normalized);
        match base {
            "floyd-steinberg" | "floydsteinberg" | "fs" => Ok(KernelKind::FloydSteinberg),
            "jarvis-judice-ninke" | "jarvisjudiceninke" | "jjn" => {
                Ok(KernelKind::JarvisJudiceNinke)
            }
            _ => Err(KernelError::UnknownName(s.to_string())),
        }
    }
}
