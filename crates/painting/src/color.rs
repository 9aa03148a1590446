//! Color values and parsing
//!
//! [`ColorValue`] is the RGBA8 pixel type stored in surfaces. It is parsed
//! from hex strings (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `#` optional)
//! or CSS color names, and serializes back to its hex form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Empty color string")]
    Empty,
    #[error("Invalid hex color \"{0}\" (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
    InvalidHex(String),
    #[error("Unknown color name \"{0}\"")]
    UnknownName(String),
}

/// An RGBA color with 8 bits per channel
///
/// Layout matches one pixel of a canvas `ImageData` buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// CSS named colors understood by [`ColorValue::parse`]
const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0x00, 0x00, 0x00, 0xff]),
    ("white", [0xff, 0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00, 0xff]),
    ("lime", [0x00, 0xff, 0x00, 0xff]),
    ("green", [0x00, 0x80, 0x00, 0xff]),
    ("blue", [0x00, 0x00, 0xff, 0xff]),
    ("yellow", [0xff, 0xff, 0x00, 0xff]),
    ("cyan", [0x00, 0xff, 0xff, 0xff]),
    ("aqua", [0x00, 0xff, 0xff, 0xff]),
    ("magenta", [0xff, 0x00, 0xff, 0xff]),
    ("fuchsia", [0xff, 0x00, 0xff, 0xff]),
    ("gray", [0x80, 0x80, 0x80, 0xff]),
    ("grey", [0x80, 0x80, 0x80, 0xff]),
    ("silver", [0xc0, 0xc0, 0xc0, 0xff]),
    ("maroon", [0x80, 0x00, 0x00, 0xff]),
    ("olive", [0x80, 0x80, 0x00, 0xff]),
    ("navy", [0x00, 0x00, 0x80, 0xff]),
    ("purple", [0x80, 0x00, 0x80, 0xff]),
    ("teal", [0x00, 0x80, 0x80, 0xff]),
    ("orange", [0xff, 0xa5, 0x00, 0xff]),
    ("transparent", [0x00, 0x00, 0x00, 0x00]),
];

impl ColorValue {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Opaque color from RGB channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex string or CSS color name
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(trimmed.to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some((_, [r, g, b, a])) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(Self::rgba(*r, *g, *b, *a));
        }

        // Palette data is commonly written without the leading '#'
        if let Some(color) = parse_hex(trimmed) {
            return Ok(color);
        }

        if trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            Err(ColorError::InvalidHex(trimmed.to_string()))
        } else {
            Err(ColorError::UnknownName(trimmed.to_string()))
        }
    }

    /// RGB channels without alpha
    pub fn to_rgb_bytes(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with full alpha
    pub fn opaque(self) -> Self {
        Self { a: 0xff, ..self }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex(hex: &str) -> Option<ColorValue> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(ColorValue::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(ColorValue::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(ColorValue::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(ColorValue::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ColorValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Anything that can be normalized into a [`ColorValue`]
///
/// Lets color setters accept either an already-parsed value or raw picker
/// and palette strings, failing on the latter when they do not parse.
pub trait ToColor {
    fn to_color(&self) -> Result<ColorValue, ColorError>;
}

impl ToColor for ColorValue {
    fn to_color(&self) -> Result<ColorValue, ColorError> {
        Ok(*self)
    }
}

impl ToColor for str {
    fn to_color(&self) -> Result<ColorValue, ColorError> {
        ColorValue::parse(self)
    }
}

impl ToColor for String {
    fn to_color(&self) -> Result<ColorValue, ColorError> {
        ColorValue::parse(self)
    }
}

impl<T: ToColor + ?Sized> ToColor for &T {
    fn to_color(&self) -> Result<ColorValue, ColorError> {
        (**self).to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(ColorValue::parse("#f00").unwrap(), ColorValue::rgb(255, 0, 0));
        assert_eq!(ColorValue::parse("#f0f").unwrap(), ColorValue::rgb(255, 0, 255));
        assert_eq!(ColorValue::parse("#0008").unwrap(), ColorValue::rgba(0, 0, 0, 0x88));
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(ColorValue::parse("#1D2B53").unwrap(), ColorValue::rgb(0x1d, 0x2b, 0x53));
        assert_eq!(ColorValue::parse("  #ff004d80 ").unwrap(), ColorValue::rgba(0xff, 0x00, 0x4d, 0x80));
    }

    #[test]
    fn test_parse_hex_without_hash() {
        assert_eq!(ColorValue::parse("FFA300").unwrap(), ColorValue::rgb(0xff, 0xa3, 0x00));
        assert_eq!(ColorValue::parse("000000").unwrap(), ColorValue::BLACK);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(ColorValue::parse("White").unwrap(), ColorValue::WHITE);
        assert_eq!(ColorValue::parse("fuchsia").unwrap(), ColorValue::parse("#f0f").unwrap());
        assert_eq!(ColorValue::parse("transparent").unwrap(), ColorValue::TRANSPARENT);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(ColorValue::parse("   "), Err(ColorError::Empty));
        assert!(matches!(ColorValue::parse("#ff"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(ColorValue::parse("#gggggg"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(ColorValue::parse("12345"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(ColorValue::parse("notacolor"), Err(ColorError::UnknownName(_))));
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(ColorValue::rgb(255, 0, 77).to_hex(), "#ff004d");
        assert_eq!(ColorValue::rgba(0, 0, 0, 0).to_string(), "#00000000");
        assert_eq!(ColorValue::rgb(1, 2, 3).to_rgb_bytes(), (1, 2, 3));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&ColorValue::rgb(0x29, 0xad, 0xff)).unwrap();
        assert_eq!(json, "\"#29adff\"");
        let back: ColorValue = serde_json::from_str("\"#83769C\"").unwrap();
        assert_eq!(back, ColorValue::rgb(0x83, 0x76, 0x9c));
        assert!(serde_json::from_str::<ColorValue>("\"nope\"").is_err());
    }

    #[test]
    fn test_to_color_inputs() {
        let owned = String::from("#fff");
        assert_eq!(owned.to_color().unwrap(), ColorValue::WHITE);
        assert_eq!("black".to_color().unwrap(), ColorValue::BLACK);
        assert_eq!(ColorValue::WHITE.to_color().unwrap(), ColorValue::WHITE);
        assert!("#12".to_color().is_err());
    }
}
