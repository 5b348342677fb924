//! RGBA colors with hex parsing and HSV conversion.
//!
//! The procedural layers pick their palettes in HSV (a random hue at a fixed
//! low saturation and high value gives the star field its uniform "night"
//! look) and the light layer's color stops are written as `#RRGGBB` strings,
//! so both conversions live here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a hex color string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string is not of the form `#RRGGBB`.
    #[error("malformed hex color '{0}', expected #RRGGBB")]
    Malformed(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` hex string into an opaque color.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError::Malformed`] if the string is not a `#`
    /// followed by exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::Malformed(hex.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParseColorError::Malformed(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParseColorError::Malformed(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255))
    }

    /// Convert an HSV color to RGBA.
    ///
    /// `h` is the hue in degrees (wrapped into `0..360`), `s` the saturation
    /// and `v` the value, both in `0..=100`. The result is opaque.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let clamp = |c: f32| c.clamp(0.0, 255.0) as u8;
        if s <= 0.0 {
            let gray = clamp(v * 255.0 / 100.0);
            return Self::new(gray, gray, gray, 255);
        }

        let h = h.rem_euclid(360.0);
        let sector = (h / 60.0).floor();
        let f = h / 60.0 - sector;
        let v = v * 255.0 / 100.0;
        let m = v * (1.0 - s / 100.0);
        let n = v * (1.0 - s / 100.0 * f);
        let k = v * (1.0 - s / 100.0 * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (v, k, m),
            1 => (n, v, m),
            2 => (m, v, k),
            3 => (m, n, v),
            4 => (k, m, v),
            _ => (v, m, n),
        };
        Self::new(clamp(r), clamp(g), clamp(b), 255)
    }

    /// This color with its alpha channel set from a `0..=1` fraction.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Linear interpolation between two colors (`t` clamped to `0..=1`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix =
            |a: u8, b: u8| f32::from(a).mul_add(1.0 - t, f32::from(b) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}
