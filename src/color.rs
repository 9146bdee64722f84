//! Color values and the RGB -> HEX / HSL conversions used for display.

use std::fmt;

use palette::Srgb;
use serde::Serialize;

use crate::error::ExtractError;

/// A sampled color: 8-bit RGB plus alpha normalized to [0, 1].
///
/// Only point sampling fills in a meaningful alpha; clustering works on RGB alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from raw RGBA bytes, scaling alpha by 1/255.
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a as f32 / 255.0)
    }

    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

/// HSL triple rounded for display: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Formats a color as `#rrggbb` with lowercase, zero-padded digits.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Formats a color as `rgb(r, g, b)`.
pub fn rgb_to_css(r: u8, g: u8, b: u8) -> String {
    format!("rgb({r}, {g}, {b})")
}

/// Parses `#rrggbb` or `rrggbb` (case insensitive).
pub fn parse_hex(s: &str) -> Result<Srgb<u8>, ExtractError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExtractError::InvalidHex(s.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ExtractError::InvalidHex(s.to_string()))
    };
    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Standard RGB -> HSL transform, with each component rounded to the nearest integer.
///
/// Hue is taken from whichever channel is the maximum (red, then green, then
/// blue on ties), normalized to [0, 1) and scaled to degrees before rounding.
/// Halves round up. Achromatic input (`r == g == b`) yields hue and saturation 0.
/// Hue can round up to 360 for colors just below red on the wheel.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let (red, green, blue) =
        Srgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0).into_components();

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == red {
            ((green - blue) / d + if green < blue { 6.0 } else { 0.0 }) / 6.0
        } else if max == green {
            ((blue - red) / d + 2.0) / 6.0
        } else {
            ((red - green) / d + 4.0) / 6.0
        };
        (h, s)
    };

    let round_half_up = |v: f64| (v + 0.5).floor();
    Hsl {
        h: round_half_up(h * 360.0) as u16,
        s: round_half_up(s * 100.0) as u8,
        l: round_half_up(l * 100.0) as u8,
    }
}
