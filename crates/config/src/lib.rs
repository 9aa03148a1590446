//! Shared configuration for pixelpad
//!
//! This crate is the single source of truth for the raster grid size, the
//! camera zoom behavior and the initial color selection. The browser host
//! reads it from the canvas element, native callers can build it from the
//! environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default grid width in canvas pixels
pub const DEFAULT_GRID_WIDTH: u32 = 32;

/// Default grid height in canvas pixels
pub const DEFAULT_GRID_HEIGHT: u32 = 32;

/// Scale applied around the window center at setup
pub const DEFAULT_INITIAL_SCALE: f32 = 10.0;

/// Zoom factor for the `=` / `+` key
pub const DEFAULT_ZOOM_IN_FACTOR: f32 = 1.1;

/// Zoom factor for the `-` key
pub const DEFAULT_ZOOM_OUT_FACTOR: f32 = 0.9;

/// Per-notch wheel zoom step (factor is `1 -/+ step`)
pub const DEFAULT_WHEEL_ZOOM_STEP: f32 = 0.1;

/// Smallest cumulative camera scale
pub const DEFAULT_MIN_SCALE: f32 = 0.25;

/// Largest cumulative camera scale
pub const DEFAULT_MAX_SCALE: f32 = 256.0;

/// Environment variable selecting the grid preset (`16` or `32`)
pub const GRID_ENV_VAR: &str = "PIXELPAD_GRID";

/// Errors produced while loading or validating a [`CanvasConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Invalid scale bounds: min={min}, max={max}")]
    ScaleBounds { min: f32, max: f32 },

    #[error("Invalid {name}: {value} (must be finite and > 0)")]
    NonPositive { name: &'static str, value: f32 },
}

/// Fixed grid sizes offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridPreset {
    /// 16x16 canvas
    Small,
    /// 32x32 canvas
    #[default]
    Large,
}

impl GridPreset {
    /// Grid dimensions (width, height) for this preset
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Small => (16, 16),
            Self::Large => (DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
        }
    }

    /// Parse from environment variable PIXELPAD_GRID
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(GRID_ENV_VAR).ok().as_deref())
    }

    /// Preset for a PIXELPAD_GRID value; unset or unknown values give `Large`
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("16") => Self::Small,
            _ => Self::Large,
        }
    }
}

/// Canvas and camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Grid width in canvas pixels
    pub grid_width: u32,
    /// Grid height in canvas pixels
    pub grid_height: u32,
    /// Scale applied around the window center at setup
    pub initial_scale: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub wheel_zoom_step: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Stage stroke writes on a scratch surface and present per event
    pub buffered: bool,
    /// Initial primary color (any string the color parser accepts)
    pub primary: String,
    /// Initial secondary color
    pub secondary: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_scale: DEFAULT_INITIAL_SCALE,
            zoom_in_factor: DEFAULT_ZOOM_IN_FACTOR,
            zoom_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            wheel_zoom_step: DEFAULT_WHEEL_ZOOM_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            buffered: true,
            primary: "#000".to_string(),
            secondary: "#fff".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Create a config for one of the fixed grid presets
    pub fn with_preset(preset: GridPreset) -> Self {
        let (grid_width, grid_height) = preset.dimensions();
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Build a config from the environment (grid preset only)
    pub fn from_env() -> Self {
        Self::with_preset(GridPreset::from_env())
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the camera and surfaces rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (name, value) in [
            ("initial_scale", self.initial_scale),
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
            ("min_scale", self.min_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        // A step of 1.0 or more would turn a wheel-down notch into a zero or negative factor
        if !self.wheel_zoom_step.is_finite()
            || self.wheel_zoom_step <= 0.0
            || self.wheel_zoom_step >= 1.0
        {
            return Err(ConfigError::NonPositive {
                name: "wheel_zoom_step",
                value: self.wheel_zoom_step,
            });
        }

        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ConfigError::ScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        Ok(())
    }

    /// Grid dimensions as (width, height)
    pub fn grid(&self) -> (u32, u32) {
        (self.grid_width, self.grid_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.grid(), (32, 32));
        assert_eq!(config.initial_scale, DEFAULT_INITIAL_SCALE);
        assert!(config.buffered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GridPreset::Small.dimensions(), (16, 16));
        assert_eq!(CanvasConfig::with_preset(GridPreset::Small).grid(), (16, 16));
    }

    #[test]
    fn test_grid_preset_env_values() {
        assert_eq!(GridPreset::from_env_value(Some("16")), GridPreset::Small);
        assert_eq!(GridPreset::from_env_value(Some(" 16\n")), GridPreset::Small);
        assert_eq!(GridPreset::from_env_value(Some("32")), GridPreset::Large);
        assert_eq!(GridPreset::from_env_value(Some("64")), GridPreset::Large);
        assert_eq!(GridPreset::from_env_value(None), GridPreset::Large);
    }

    #[test]
    fn test_from_env() {
        // Only this test touches the variable
        unsafe { std::env::set_var(GRID_ENV_VAR, "16") };
        assert_eq!(GridPreset::from_env(), GridPreset::Small);
        assert_eq!(CanvasConfig::from_env().grid(), (16, 16));

        unsafe { std::env::set_var(GRID_ENV_VAR, "32") };
        assert_eq!(CanvasConfig::from_env().grid(), (32, 32));

        unsafe { std::env::remove_var(GRID_ENV_VAR) };
        assert_eq!(GridPreset::from_env(), GridPreset::Large);
        assert_eq!(CanvasConfig::from_env(), CanvasConfig::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CanvasConfig::from_json(r#"{"grid_width": 16, "grid_height": 16}"#).unwrap();
        assert_eq!(config.grid(), (16, 16));
        assert_eq!(config.zoom_in_factor, DEFAULT_ZOOM_IN_FACTOR);
        assert_eq!(config.primary, "#000");
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{"grid_width": 0}"#),
            Err(ConfigError::EmptyGrid { .. })
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"min_scale": 4.0, "max_scale": 2.0}"#),
            Err(ConfigError::ScaleBounds { .. })
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"zoom_out_factor": -0.9}"#),
            Err(ConfigError::NonPositive { name: "zoom_out_factor", .. })
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"wheel_zoom_step": 1.0}"#),
            Err(ConfigError::NonPositive { name: "wheel_zoom_step", .. })
        ));
        assert!(matches!(CanvasConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }
}
