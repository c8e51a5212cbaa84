//! The seven colors of an ACeP / Spectra-style e-ink panel.

use std::fmt;

use crate::color::Rgb;

/// Identity of one of the seven panel colors.
///
/// The discriminant is the device color code, which is also the entry's
/// index in [`Palette::eink7`](super::Palette::eink7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EinkColor {
    Black = 0,
    White = 1,
    Green = 2,
    Blue = 3,
    Red = 4,
    Yellow = 5,
    Orange = 6,
}

impl EinkColor {
    /// All seven colors in device code order.
    pub const ALL: [EinkColor; 7] = [
        EinkColor::Black,
        EinkColor::White,
        EinkColor::Green,
        EinkColor::Blue,
        EinkColor::Red,
        EinkColor::Yellow,
        EinkColor::Orange,
    ];

    /// The color's sRGB value as sent to the panel.
    pub const fn rgb(self) -> Rgb {
        match self {
            EinkColor::Black => Rgb::new(0, 0, 0),
            EinkColor::White => Rgb::new(255, 255, 255),
            EinkColor::Green => Rgb::new(0, 255, 0),
            EinkColor::Blue => Rgb::new(0, 0, 255),
            EinkColor::Red => Rgb::new(255, 0, 0),
            EinkColor::Yellow => Rgb::new(255, 255, 0),
            EinkColor::Orange => Rgb::new(255, 165, 0),
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            EinkColor::Black => "black",
            EinkColor::White => "white",
            EinkColor::Green => "green",
            EinkColor::Blue => "blue",
            EinkColor::Red => "red",
            EinkColor::Yellow => "yellow",
            EinkColor::Orange => "orange",
        }
    }

    /// Device color code (0..=6).
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by device code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Look up a color by its exact sRGB value.
    pub fn from_rgb(color: Rgb) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.rgb() == color)
    }
}

impl fmt::Display for EinkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
