//! Display colors for terrain visualization

use serde::{Deserialize, Serialize};

/// Simple RGBA color used to visualize Wang colors in editors (no engine dependency)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Parse a Tiled color string: `#rrggbb` or `#aarrggbb`, leading `#` optional.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        let channel = |i: usize| -> Option<f32> {
            let byte = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
            Some(byte as f32 / 255.0)
        };

        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(2)?, channel(4)?, channel(6)?, channel(0)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_hex() {
        let c = Color::from_hex("#ff0000").unwrap();
        assert_eq!(c, Color::RED);

        let c = Color::from_hex("00ff00").unwrap();
        assert_eq!(c, Color::GREEN);
    }

    #[test]
    fn parses_argb_hex() {
        let c = Color::from_hex("#800000ff").unwrap();
        assert_eq!(c.b, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Color::from_hex("#ff00").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
    }
}
