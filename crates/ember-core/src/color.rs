//! RGB color with hex-string parsing and 24-bit packing

use crate::error::EmberError;
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB triple.
///
/// Serializes as a `"#rrggbb"` hex string, the form configuration files use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a 24-bit `0xRRGGBB` integer
    pub const fn from_packed(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Pack into a 24-bit `0xRRGGBB` integer
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse a `"#rrggbb"` or `"rrggbb"` hex string
    pub fn from_hex_str(s: &str) -> Result<Self, EmberError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(EmberError::InvalidColor(s.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| EmberError::InvalidColor(s.to_string()))?;
        Ok(Self::from_packed(value))
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.to_packed())
    }
}

impl TryFrom<String> for Rgb {
    type Error = EmberError;
    fn try_from(s: String) -> Result<Self, EmberError> {
        Self::from_hex_str(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex_string()
    }
}

/// Blend two colors and pack the result, rounding each channel.
pub fn lerp_packed(a: Rgb, b: Rgb, t: f32) -> u32 {
    let r = (a.r as f32 + (b.r as f32 - a.r as f32) * t).round() as u32;
    let g = (a.g as f32 + (b.g as f32 - a.g as f32) * t).round() as u32;
    let bl = (a.b as f32 + (b.b as f32 - a.b as f32) * t).round() as u32;
    (r << 16) | (g << 8) | bl
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_with_and_without_hash() {
        let c = Rgb::from_hex_str("#ff8844").unwrap();
        assert_eq!(c, Rgb::new(255, 136, 68));
        assert_eq!(Rgb::from_hex_str("ff8844").unwrap(), c);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Rgb::from_hex_str("#ff884").is_err());
        assert!(Rgb::from_hex_str("zzzzzz").is_err());
    }

    #[test]
    fn pack_round_trip() {
        let c = Rgb::from_packed(0x123456);
        assert_eq!(c.to_packed(), 0x123456);
        assert_eq!(c.to_hex_string(), "#123456");
    }

    #[test]
    fn midpoint_rounds_per_channel() {
        // Red to blue: 255 -> 0 halves to 127.5, rounds to 128
        let mid = lerp_packed(Rgb::from_packed(0xFF0000), Rgb::from_packed(0x0000FF), 0.5);
        assert_eq!(mid, 0x800080);
    }

    #[test]
    fn serde_hex_string_form() {
        let c: Rgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(c, Rgb::new(0, 255, 0));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00ff00\"");
    }
}
