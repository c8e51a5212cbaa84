//! 8-bit sRGB color type
//!
//! [`Rgb`] is the byte-exact color representation used at the edges of the
//! pipeline: palette entries, cache keys and output pixels are all `Rgb`.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color with three gamma-encoded 8-bit channels.
///
/// Equality and hashing are byte-exact, which makes `Rgb` usable as the key
/// of the nearest-color memo cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    ///
    /// # Example
    /// ```
    /// use eink7_dither::Rgb;
    /// let orange = Rgb::new(255, 165, 0);
    /// assert_eq!(orange.g, 165);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from float channels by clamping to 0..=255 and rounding
    /// half away from zero.
    ///
    /// NaN channels map to 0.
    ///
    /// # Example
    /// ```
    /// use eink7_dither::Rgb;
    /// assert_eq!(Rgb::from_f32_clamped(-3.0, 127.5, 300.0), Rgb::new(0, 128, 255));
    /// ```
    #[inline]
    pub fn from_f32_clamped(r: f32, g: f32, b: f32) -> Self {
        Self::new(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
    }

    /// Channels as floats, in the same 0.0..=255.0 scale as the dither buffer.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [f32::from(self.r), f32::from(self.g), f32::from(self.b)]
    }

    /// Euclidean distance between the raw 8-bit channels.
    #[inline]
    pub fn euclidean_distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

#[inline]
fn channel_to_u8(value: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    value.clamp(0.0, 255.0).round() as u8
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    /// Formats as `#RRGGBB` with uppercase hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use eink7_dither::Rgb;
    ///
    /// let orange: Rgb = "#FFA500".parse().unwrap();
    /// assert_eq!(orange, Rgb::new(255, 165, 0));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            // Shorthand: 0xF expands to 0xFF
            &[r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            &[r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            _ => Err(ParseColorError::InvalidLength(digits.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(Rgb::new(0, 0, 0).euclidean_distance(Rgb::new(3, 4, 0)), 5.0);
        assert_eq!(Rgb::new(9, 9, 9).euclidean_distance(Rgb::new(9, 9, 9)), 0.0);
        let far = Rgb::new(0, 0, 0).euclidean_distance(Rgb::new(255, 255, 255));
        assert!((far - 255.0 * 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_bytes_conversions() {
        let color = Rgb::from_bytes([12, 34, 56]);
        assert_eq!(color, Rgb::new(12, 34, 56));
        assert_eq!(color.to_bytes(), [12, 34, 56]);
        let arr: [u8; 3] = color.into();
        assert_eq!(arr, [12, 34, 56]);
        assert_eq!(Rgb::from([1, 2, 3]), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_from_f32_clamped_rounds_and_clamps() {
        assert_eq!(Rgb::from_f32_clamped(0.4, 0.5, 254.6), Rgb::new(0, 1, 255));
        assert_eq!(Rgb::from_f32_clamped(-100.0, 1e9, 128.49), Rgb::new(0, 255, 128));
        assert_eq!(
            Rgb::from_f32_clamped(f32::NAN, f32::INFINITY, f32::NEG_INFINITY),
            Rgb::new(0, 255, 0)
        );
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(Rgb::new(0, 128, 255).to_f32(), [0.0, 128.0, 255.0]);
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(255, 165, 0).to_string(), "#FFA500");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_parse_hex_six_digit() {
        let color: Rgb = "#FF8000".parse().unwrap();
        assert_eq!(color, Rgb::new(255, 128, 0));

        let color: Rgb = "00ff7f".parse().unwrap();
        assert_eq!(color, Rgb::new(0, 255, 127));
    }

    #[test]
    fn test_parse_hex_three_digit() {
        let color: Rgb = "#FFF".parse().unwrap();
        assert_eq!(color, Rgb::new(255, 255, 255));

        let color: Rgb = "#1a0".parse().unwrap();
        assert_eq!(color, Rgb::new(0x11, 0xAA, 0x00));
    }

    #[test]
    fn test_parse_hex_whitespace() {
        let color: Rgb = "  #00FF00  ".parse().unwrap();
        assert_eq!(color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_parse_display_round_trip() {
        let color = Rgb::new(1, 2, 254);
        let parsed: Rgb = color.to_string().parse().unwrap();
        assert_eq!(parsed, color);
    }

    #[test]
    fn test_parse_hex_invalid_length() {
        assert_eq!("#FFFF".parse::<Rgb>(), Err(ParseColorError::InvalidLength(4)));
        assert_eq!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength(0)));
        assert_eq!("#".parse::<Rgb>(), Err(ParseColorError::InvalidLength(0)));
    }

    #[test]
    fn test_parse_hex_invalid_digit() {
        assert_eq!("#GGG".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('G')));
        assert_eq!("+FFFFF".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('+')));
        assert_eq!("#ffé".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('é')));
    }
}
