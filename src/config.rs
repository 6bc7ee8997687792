//! Tunables for the interaction core and the host app.
//!
//! Every field has a default, so a config file only needs the values it
//! changes.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

use crate::shape::{ArcAngles, ShapeKind, ShapeSizes};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A palette entry shown in the control panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: Color32,
}

impl NamedColor {
    pub fn new(name: &str, color: Color32) -> Self {
        Self {
            name: name.to_owned(),
            color,
        }
    }
}

pub fn default_palette() -> Vec<NamedColor> {
    vec![
        NamedColor::new("red", Color32::from_rgb(255, 0, 0)),
        NamedColor::new("orange", Color32::from_rgb(255, 165, 0)),
        NamedColor::new("yellow", Color32::from_rgb(255, 255, 0)),
        NamedColor::new("green", Color32::from_rgb(0, 128, 0)),
        NamedColor::new("blue", Color32::from_rgb(0, 0, 255)),
        NamedColor::new("purple", Color32::from_rgb(128, 0, 128)),
        NamedColor::new("magenta", Color32::from_rgb(255, 0, 255)),
        NamedColor::new("black", Color32::BLACK),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hit-test tolerance for selection, in pixels
    pub halo: f32,
    /// Fill applied to a highlighted shape
    pub highlight_color: Color32,
    /// How long the "reverted to last created" flash stays visible
    pub flash_delay_secs: f64,
    /// Scale applied per motion event while the pointer moves up
    pub grow_factor: f32,
    /// Scale applied per motion event while the pointer moves down
    pub shrink_factor: f32,
    pub line_color: Color32,
    pub line_width: f32,
    pub min_line_width: f32,
    pub max_line_width: f32,
    pub shape_sizes: ShapeSizes,
    pub next_shape: ShapeKind,
    pub arc: ArcAngles,
    pub palette: Vec<NamedColor>,
    /// Gap kept around a background image when it is fitted to the canvas
    pub image_gutter: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            halo: 25.0,
            highlight_color: Color32::from_rgb(0xff, 0xff, 0xaa),
            flash_delay_secs: 0.5,
            grow_factor: 1.01,
            shrink_factor: 0.99,
            line_color: Color32::BLACK,
            line_width: 1.0,
            min_line_width: 1.0,
            max_line_width: 10.0,
            shape_sizes: ShapeSizes::default(),
            next_shape: ShapeKind::Oval,
            arc: ArcAngles::default(),
            palette: default_palette(),
            image_gutter: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn line_width_range(&self) -> RangeInclusive<f32> {
        self.min_line_width..=self.max_line_width
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.halo >= 0.0) {
            return Err(ConfigError::Invalid(format!("halo must be >= 0, got {}", self.halo)));
        }
        if !(self.grow_factor > 1.0) || !self.grow_factor.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "grow_factor must be > 1, got {}",
                self.grow_factor
            )));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "shrink_factor must be in (0, 1), got {}",
                self.shrink_factor
            )));
        }
        if !(self.flash_delay_secs >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "flash_delay_secs must be >= 0, got {}",
                self.flash_delay_secs
            )));
        }
        if !(self.min_line_width > 0.0 && self.min_line_width <= self.max_line_width) {
            return Err(ConfigError::Invalid(format!(
                "line width range {}..={} is empty",
                self.min_line_width, self.max_line_width
            )));
        }
        if !self.line_width_range().contains(&self.line_width) {
            return Err(ConfigError::Invalid(format!(
                "line_width {} outside {}..={}",
                self.line_width, self.min_line_width, self.max_line_width
            )));
        }
        // Arcs are filled as a convex pie
        let extent = self.arc.extent_deg.abs();
        if !(self.arc.start_deg.is_finite() && extent > 0.0 && extent <= 180.0) {
            return Err(ConfigError::Invalid(format!(
                "arc extent must be within 0..=180 degrees either way, got {}",
                self.arc.extent_deg
            )));
        }
        for kind in ShapeKind::ALL {
            let dims = self.shape_sizes.get(kind);
            if !dims.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "{kind} dimensions must be positive, got {}x{}",
                    dims.width, dims.height
                )));
            }
        }
        Ok(())
    }

    /// Palette name for `color`, or its hex form when it is not in the palette
    pub fn color_name(&self, color: Color32) -> String {
        self.palette
            .iter()
            .find(|entry| entry.color == color)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeDimensions;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.halo, 25.0);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "halo": 10.0, "next_shape": "arc" }"#).unwrap();
        assert_eq!(config.halo, 10.0);
        assert_eq!(config.next_shape, ShapeKind::Arc);
        assert_eq!(config.grow_factor, 1.01);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = EditorConfig::default();
        config.shape_sizes.set(ShapeKind::Rectangle, ShapeDimensions::new(80, 30));
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_factors() {
        let err = EditorConfig::from_json_str(r#"{ "grow_factor": 0.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EditorConfig::from_json_str(r#"{ "shrink_factor": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_reflex_arc() {
        let err = EditorConfig::from_json_str(r#"{ "arc": { "start_deg": 0.0, "extent_deg": 270.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = EditorConfig::from_json_str(r#"{ "arc": { "start_deg": 45.0, "extent_deg": -180.0 } }"#).unwrap();
        assert_eq!(config.arc.extent_deg, -180.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EditorConfig::from_json_str("{ halo: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_color_name() {
        let config = EditorConfig::default();
        assert_eq!(config.color_name(Color32::BLACK), "black");
        assert_eq!(config.color_name(Color32::from_rgb(1, 2, 3)), "#010203");
    }
}
