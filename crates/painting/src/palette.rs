//! Named color palettes
//!
//! A palette only feeds the host's swatch widgets; the rasterizer never
//! reads it. Values arriving from the host are validated by
//! [`Palette::from_value`] before they can become the active palette.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::color::{ColorError, ColorValue, ToColor};
use crate::constants::PICO8_COLORS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Could not set palette, provided input not a Palette: {0}")]
    InvalidType(String),
    #[error("Invalid palette color at index {index}: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ColorError,
    },
}

/// A titled, ordered list of colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub title: String,
    colors: Vec<ColorValue>,
}

impl Palette {
    /// Build a palette, parsing every color up front
    pub fn new<I, S>(title: impl Into<String>, colors: I) -> Result<Self, ColorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .map(|color| ColorValue::parse(color.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: title.into(),
            colors,
        })
    }

    /// The 16-color PICO-8 palette used by default
    pub fn pico8() -> Self {
        Self {
            title: "PICO-8".to_string(),
            colors: PICO8_COLORS
                .iter()
                .map(|&[r, g, b]| ColorValue::rgb(r, g, b))
                .collect(),
        }
    }

    /// Validate an untyped value as a palette
    ///
    /// Only an object with a string `title` and an array `colors` of color
    /// strings qualifies. A bare array of colors is rejected even if every
    /// entry parses.
    pub fn from_value(value: &Value) -> Result<Self, PaletteError> {
        let Value::Object(map) = value else {
            return Err(PaletteError::InvalidType(describe(value)));
        };

        let title = match map.get("title") {
            Some(Value::String(title)) => title.clone(),
            _ => {
                return Err(PaletteError::InvalidType(
                    "object without a string \"title\"".to_string(),
                ));
            }
        };
        let Some(Value::Array(entries)) = map.get("colors") else {
            return Err(PaletteError::InvalidType(
                "object without a \"colors\" array".to_string(),
            ));
        };

        let mut palette = Self {
            title,
            colors: Vec::with_capacity(entries.len()),
        };
        for (index, entry) in entries.iter().enumerate() {
            let Value::String(raw) = entry else {
                return Err(PaletteError::InvalidColor {
                    index,
                    source: ColorError::InvalidHex(entry.to_string()),
                });
            };
            palette
                .append(raw)
                .map_err(|source| PaletteError::InvalidColor { index, source })?;
        }

        Ok(palette)
    }

    /// Append a color, parsing it first when given as a string
    pub fn append(&mut self, color: impl ToColor) -> Result<&mut Self, ColorError> {
        self.colors.push(color.to_color()?);
        Ok(self)
    }

    pub fn colors(&self) -> &[ColorValue] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<ColorValue> {
        self.colors.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorValue> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::pico8()
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
