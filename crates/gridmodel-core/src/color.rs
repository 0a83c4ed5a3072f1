//! Color representation with HSL adjustments and alpha blending.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels and a [0.0, 1.0] alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ColorParseError::InvalidHex)
        };

        match hex.len() {
            6 => Ok(Self::rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0)),
            8 => {
                let a = channel(6..8)?;
                Ok(Self::rgba8(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    f32::from(a) / 255.0,
                ))
            }
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to hex string with alpha.
    #[must_use]
    pub fn to_hex_with_alpha(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}{:02x}", (self.a * 255.0).round() as u8)
    }

    /// CSS `rgb(r, g, b)` string, or `rgba(r, g, b, a)` when translucent.
    ///
    /// Alpha is rounded to two decimals.
    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        let a = (self.a * 100.0).round() / 100.0;
        if a >= 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {a})")
        }
    }

    /// Channels as rounded 8-bit values.
    #[must_use]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Perceived brightness in [0, 255] (W3C formula).
    #[must_use]
    pub fn brightness(&self) -> f32 {
        let [r, g, b] = self.to_rgb8();
        (f32::from(r) * 299.0 + f32::from(g) * 587.0 + f32::from(b) * 114.0) / 1000.0
    }

    /// Darken by `amount` percentage points of HSL lightness.
    ///
    /// A negative amount lightens.
    #[must_use]
    pub fn darken(&self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let l = (l - f64::from(amount) / 100.0).clamp(0.0, 1.0);
        Self::from_hsl(h, s, l, self.a)
    }

    /// Rotate the hue by `degrees`.
    #[must_use]
    pub fn spin(&self, degrees: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let hue = (h + f64::from(degrees)) % 360.0;
        let hue = if hue < 0.0 { 360.0 + hue } else { hue };
        Self::from_hsl(hue, s, l, self.a)
    }

    /// Mix `other` into this color; `amount` is the percentage [0, 100] of `other`.
    #[must_use]
    pub fn mix(&self, other: &Self, amount: f32) -> Self {
        self.lerp(other, amount / 100.0)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Hue in degrees [0, 360), saturation and lightness in [0, 1].
    #[must_use]
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r);
        let g = f64::from(self.g);
        let b = f64::from(self.b);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Build a color from HSL components (hue in degrees).
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64, a: f32) -> Self {
        if s.abs() < f64::EPSILON {
            let v = l as f32;
            return Self::new(v, v, v, a);
        }

        let h = h / 360.0;
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Self::new(
            hue_to_rgb(p, q, h + 1.0 / 3.0) as f32,
            hue_to_rgb(p, q, h) as f32,
            hue_to_rgb(p, q, h - 1.0 / 3.0) as f32,
            a,
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
    /// Invalid string length
    #[error("invalid hex string length (expected 6 or 8)")]
    InvalidLength,
}
