//! CIE L*a*b* color type (D65 white point)
//!
//! Lab is where palette candidates are ranked. Conversion goes
//! sRGB → linear RGB → XYZ → Lab using the sRGB primaries and the D65
//! reference white; all arithmetic is in `f64`.

use super::lut::srgb8_to_linear;
use super::rgb::Rgb;

/// D65 reference white in XYZ, Y normalized to 1.
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Linear sRGB → XYZ (D65)
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// (6/29)^3, below which the Lab companding function is linear.
const EPSILON: f64 = 0.008856;

/// Slope of the linear segment of the companding function.
const KAPPA_SLOPE: f64 = 7.787;

/// A color in CIE L*a*b* space.
///
/// `l` spans 0.0..=100.0; `a` and `b` roughly -128.0..=128.0 for colors
/// reachable from sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green (-) to red (+)
    pub a: f64,
    /// Blue (-) to yellow (+)
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from its components.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis: `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Perceptual distance used to rank palette candidates.
    ///
    /// This is a reduced form of CIEDE2000 that keeps only the lightness,
    /// chroma and hue difference terms without any weighting functions:
    ///
    /// ```text
    /// ΔL = L₂ - L₁
    /// ΔC = C₂ - C₁
    /// ΔH = sqrt(max(0, Δa² + Δb² - ΔC²))
    /// ΔE = sqrt(ΔL² + ΔC² + ΔH²)
    /// ```
    ///
    /// Palette matching depends on this exact formula, so it must not be
    /// swapped for the full CIEDE2000 without re-recording reference output.
    ///
    /// # Example
    /// ```
    /// use eink7_dither::{Lab, Rgb};
    /// let red = Lab::from(Rgb::new(255, 0, 0));
    /// assert_eq!(red.delta_e(red), 0.0);
    /// ```
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        let delta_l = other.l - self.l;
        let delta_c = other.chroma() - self.chroma();
        let delta_a = other.a - self.a;
        let delta_b = other.b - self.b;
        let delta_h_sq = (delta_a * delta_a + delta_b * delta_b - delta_c * delta_c).max(0.0);
        (delta_l * delta_l + delta_c * delta_c + delta_h_sq).sqrt()
    }

    /// CIE76 color difference: Euclidean distance in Lab.
    #[inline]
    pub fn delta_e_cie76(self, other: Lab) -> f64 {
        let dl = other.l - self.l;
        let da = other.a - self.a;
        let db = other.b - self.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

#[inline]
fn companding(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

/// Convert an 8-bit sRGB triple to Lab.
///
/// Pure and total over all 8-bit inputs; nothing is cached at this layer.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    let linear = [srgb8_to_linear(r), srgb8_to_linear(g), srgb8_to_linear(b)];

    let mut xyz = [0.0f64; 3];
    for (out, (row, white)) in xyz.iter_mut().zip(RGB_TO_XYZ.iter().zip(WHITE_D65)) {
        let dot = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
        *out = dot / white;
    }

    let fx = companding(xyz[0]);
    let fy = companding(xyz[1]);
    let fz = companding(xyz[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

impl From<Rgb> for Lab {
    #[inline]
    fn from(color: Rgb) -> Self {
        rgb_to_lab(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lab_close(actual: Lab, expected: (f64, f64, f64), tol: f64) {
        assert!(
            (actual.l - expected.0).abs() < tol
                && (actual.a - expected.1).abs() < tol
                && (actual.b - expected.2).abs() < tol,
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_black_is_origin() {
        let black = rgb_to_lab(0, 0, 0);
        assert_lab_close(black, (0.0, 0.0, 0.0), 1e-9);
    }

    #[test]
    fn test_white_is_l100_neutral() {
        let white = rgb_to_lab(255, 255, 255);
        assert_lab_close(white, (100.0, 0.0, 0.0), 1e-2);
    }

    #[test]
    fn test_reference_primaries() {
        assert_lab_close(rgb_to_lab(255, 0, 0), (53.24, 80.09, 67.20), 0.1);
        assert_lab_close(rgb_to_lab(0, 255, 0), (87.73, -86.18, 83.18), 0.1);
        assert_lab_close(rgb_to_lab(0, 0, 255), (32.30, 79.19, -107.86), 0.1);
        assert_lab_close(rgb_to_lab(255, 255, 0), (97.14, -21.55, 94.48), 0.1);
    }

    #[test]
    fn test_mid_gray_lightness() {
        let gray = rgb_to_lab(128, 128, 128);
        assert!((gray.l - 53.59).abs() < 0.01, "got {}", gray.l);
        assert!(gray.a.abs() < 0.01 && gray.b.abs() < 0.01);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        for v in [0u8, 17, 128, 200, 255] {
            assert_eq!(rgb_to_lab(v, 255 - v, v / 2), rgb_to_lab(v, 255 - v, v / 2));
        }
    }

    #[test]
    fn test_from_rgb_matches_function() {
        assert_eq!(Lab::from(Rgb::new(255, 165, 0)), rgb_to_lab(255, 165, 0));
    }

    #[test]
    fn test_lightness_monotonic_along_gray_axis() {
        let mut prev = rgb_to_lab(0, 0, 0).l;
        for v in 1..=255u8 {
            let l = rgb_to_lab(v, v, v).l;
            assert!(l > prev, "L not monotonic at gray {v}");
            prev = l;
        }
    }

    #[test]
    fn test_delta_e_identity_and_symmetry() {
        let a = rgb_to_lab(255, 165, 0);
        let b = rgb_to_lab(12, 200, 90);
        assert_eq!(a.delta_e(a), 0.0);
        assert!((a.delta_e(b) - b.delta_e(a)).abs() < 1e-12);
        assert!(a.delta_e(b) > 0.0);
    }

    #[test]
    fn test_delta_e_lightness_only() {
        let a = Lab::new(30.0, 0.0, 0.0);
        let b = Lab::new(70.0, 0.0, 0.0);
        assert!((a.delta_e(b) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_e_hue_term_floors_at_zero() {
        // Same hue angle, different chroma: Δa² + Δb² equals ΔC², so the
        // hue term would be 0 (and may come out slightly negative in floats).
        let a = Lab::new(50.0, 3.0, 4.0);
        let b = Lab::new(50.0, 6.0, 8.0);
        let d = a.delta_e(b);
        assert!((d - 5.0).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn test_delta_e_matches_cie76_in_euclidean_terms() {
        // ΔC² + ΔH² = Δa² + Δb² whenever the hue term is not floored, so the
        // reduced formula agrees with CIE76.
        let a = Lab::new(40.0, 20.0, -10.0);
        let b = Lab::new(60.0, -5.0, 30.0);
        assert!((a.delta_e(b) - a.delta_e_cie76(b)).abs() < 1e-9);
    }

    #[test]
    fn test_cie76() {
        let a = Lab::new(0.0, 0.0, 0.0);
        let b = Lab::new(2.0, 3.0, 6.0);
        assert!((a.delta_e_cie76(b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_chroma() {
        assert!((Lab::new(50.0, 3.0, 4.0).chroma() - 5.0).abs() < 1e-12);
    }
}
