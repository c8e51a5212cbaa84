//! Gamma lookup table for 8-bit sRGB channels
//!
//! The table is generated at compile time by build.rs with the exact
//! IEC 61966-2-1 transfer function, so a lookup is interchangeable with
//! [`srgb_to_linear`].

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel to linear light in 0.0..=1.0.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Decode a normalized sRGB channel (0.0..=1.0) to linear light.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lut_matches_formula_exactly() {
        for v in 0..=255u8 {
            let expected = srgb_to_linear(f64::from(v) / 255.0);
            assert_eq!(
                srgb8_to_linear(v).to_bits(),
                expected.to_bits(),
                "LUT entry {v} differs from the transfer function"
            );
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(srgb8_to_linear(0), 0.0);
        assert!((srgb8_to_linear(255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_segment() {
        // 10/255 = 0.0392 sits below the 0.04045 knee
        let expected = (10.0 / 255.0) / 12.92;
        assert!((srgb8_to_linear(10) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = srgb8_to_linear(0);
        for v in 1..=255u8 {
            let curr = srgb8_to_linear(v);
            assert!(curr > prev, "srgb8_to_linear not monotonic at {v}");
            prev = curr;
        }
    }
}
