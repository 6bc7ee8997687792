use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::shape::{ShapeKind, ShapeSizes};
use crate::surface::Style;

/// Operator-chosen drawing settings for one canvas.
///
/// Persisted by the app between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub line_color: Color32,
    pub line_width: f32,
    pub next_shape: ShapeKind,
    pub shape_sizes: ShapeSizes,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl CanvasSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            line_color: config.line_color,
            line_width: config.line_width,
            next_shape: config.next_shape,
            shape_sizes: config.shape_sizes,
        }
    }

    /// Style for the next primitive drawn on this canvas
    pub fn style(&self) -> Style {
        Style::new(self.line_color, self.line_width)
    }
}
