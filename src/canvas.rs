use egui::Color32;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EditorConfig;
use crate::input::InputEvent;
use crate::point::Point;
use crate::pointer::PointerHistory;
use crate::shape::{ShapeDimensions, ShapeKind};
use crate::state::CanvasSettings;
use crate::surface::Scene;
use crate::tools::{CenterReport, LineTool, ShapeTool, Tool, ToolContext, ToolType};

/// Interaction mode of a canvas, fixed when the canvas is built
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Freehand,
    Lines,
    Shapes,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Freehand => "freehand",
            Self::Lines => "lines",
            Self::Shapes => "shapes",
        };
        f.write_str(name)
    }
}

/// One drawing surface with its own pointer history and interaction engine
#[derive(Debug, Clone)]
pub struct Canvas {
    mode: Mode,
    scene: Scene,
    history: PointerHistory,
    tool: ToolType,
    settings: CanvasSettings,
    config: EditorConfig,
    cursor: Option<Point>,
}

impl Canvas {
    pub fn new(mode: Mode, config: EditorConfig) -> Self {
        Self::with_settings(mode, CanvasSettings::from_config(&config), config)
    }

    /// Starts from `settings` saved by an earlier session. They pass through
    /// the same checks as the setters, so values the current config no
    /// longer allows fall back to its defaults or limits.
    pub fn with_settings(mode: Mode, settings: CanvasSettings, config: EditorConfig) -> Self {
        info!("New {} canvas", mode);
        let mut canvas = Self {
            mode,
            scene: Scene::new(),
            history: PointerHistory::new(),
            tool: ToolType::for_mode(mode, &config),
            settings: CanvasSettings::from_config(&config),
            config,
            cursor: None,
        };
        canvas.restore(settings);
        canvas
    }

    fn restore(&mut self, saved: CanvasSettings) {
        self.set_line_color(saved.line_color);
        self.set_line_width(saved.line_width);
        self.set_next_shape(saved.next_shape);
        for kind in ShapeKind::ALL {
            self.set_dimensions(kind, saved.shape_sizes.get(kind));
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &PointerHistory {
        &self.history
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn line_tool(&self) -> Option<&LineTool> {
        self.tool.as_line_tool()
    }

    pub fn shape_tool(&self) -> Option<&ShapeTool> {
        self.tool.as_shape_tool()
    }

    /// Feed one input event to this canvas's engine
    pub fn handle_event(&mut self, event: &InputEvent, now: f64) {
        let mut ctx = ToolContext {
            surface: &mut self.scene,
            history: &mut self.history,
            settings: &self.settings,
            now,
        };

        match *event {
            InputEvent::PointerDown {
                pos,
                button,
                modifier,
                clicks,
            } => {
                debug!("{:?} {:?} press at {} ({:?})", clicks, button, pos, modifier);
                self.tool.on_pointer_down(pos, button, modifier, clicks, &mut ctx);
            }
            InputEvent::PointerMove { pos, held, modifier } => {
                self.cursor = Some(pos);
                self.tool.on_pointer_move(pos, held, modifier, &mut ctx);
            }
            InputEvent::PointerLeave => {
                self.cursor = None;
            }
            InputEvent::KeyDown { key, modifier } => {
                self.tool.on_key(key, modifier, &mut ctx);
            }
        }
    }

    /// Run deferred work that is due at `now`
    pub fn tick(&mut self, now: f64) {
        let mut ctx = ToolContext {
            surface: &mut self.scene,
            history: &mut self.history,
            settings: &self.settings,
            now,
        };
        self.tool.on_tick(&mut ctx);
    }

    /// When the canvas next needs a tick, if anything is scheduled
    pub fn next_due(&self) -> Option<f64> {
        self.tool.as_shape_tool().and_then(ShapeTool::next_due)
    }

    pub fn set_line_color(&mut self, color: Color32) {
        self.settings.line_color = color;
        info!("{} canvas color: {}", self.mode, self.config.color_name(color));
    }

    /// Clamped to the configured width range
    pub fn set_line_width(&mut self, width: f32) {
        if !width.is_finite() {
            return;
        }
        let range = self.config.line_width_range();
        self.settings.line_width = width.clamp(*range.start(), *range.end());
    }

    pub fn set_next_shape(&mut self, kind: ShapeKind) {
        self.settings.next_shape = kind;
    }

    /// Dimensions for shapes of `kind` created from now on. Non-positive
    /// dimensions are ignored.
    pub fn set_dimensions(&mut self, kind: ShapeKind, dims: ShapeDimensions) -> bool {
        if !dims.is_valid() {
            debug!("Ignoring {}x{} for {}", dims.width, dims.height, kind);
            return false;
        }
        self.settings.shape_sizes.set(kind, dims);
        true
    }

    /// Last pointer position over the canvas, as `"x,y"`
    pub fn cursor_text(&self) -> Option<String> {
        self.cursor.map(|pos| pos.to_string())
    }

    pub fn center_report(&self) -> Option<CenterReport> {
        self.tool.as_shape_tool().and_then(ShapeTool::center_report)
    }

    /// Name of the current line color, for the status bar
    pub fn color_report(&self) -> String {
        self.config.color_name(self.settings.line_color)
    }

    pub fn state_name(&self) -> &'static str {
        self.tool.current_state_name()
    }
}
