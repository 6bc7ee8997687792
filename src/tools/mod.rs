use crate::config::EditorConfig;
use crate::input::{ArrowKey, ClickCount, Modifier, PointerButton};
use crate::point::Point;
use crate::pointer::PointerHistory;
use crate::state::CanvasSettings;
use crate::surface::DrawingSurface;

/// Everything a tool may touch while handling one event
pub struct ToolContext<'a> {
    pub surface: &'a mut dyn DrawingSurface,
    pub history: &'a mut PointerHistory,
    pub settings: &'a CanvasSettings,
    /// Seconds, from the host's clock
    pub now: f64,
}

/// Tool trait defines how a canvas mode reacts to input
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Name of the state the tool's state machine is in, for display
    fn current_state_name(&self) -> &'static str;

    /// Handle a button press on the canvas
    fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        modifier: Modifier,
        clicks: ClickCount,
        ctx: &mut ToolContext<'_>,
    );

    /// Handle pointer motion, with or without a button held
    fn on_pointer_move(
        &mut self,
        pos: Point,
        held: Option<PointerButton>,
        modifier: Modifier,
        ctx: &mut ToolContext<'_>,
    );

    /// Handle an arrow key
    fn on_key(&mut self, _key: ArrowKey, _modifier: Modifier, _ctx: &mut ToolContext<'_>) {
        // default: keys are ignored
    }

    /// Called once per frame so deferred work can run
    fn on_tick(&mut self, _ctx: &mut ToolContext<'_>) {
        // default: nothing scheduled
    }
}

mod freehand_tool;
pub use freehand_tool::FreehandTool;

mod line_tool;
pub use line_tool::LineTool;

mod shape_tool;
pub use shape_tool::{CenterReport, ShapeTool};

mod selection_tool;
pub use selection_tool::SelectionController;

/// Enum representing all available tool types
#[derive(Debug, Clone)]
pub enum ToolType {
    Freehand(FreehandTool),
    Lines(LineTool),
    Shapes(ShapeTool),
}

impl ToolType {
    pub fn as_line_tool(&self) -> Option<&LineTool> {
        match self {
            Self::Lines(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_shape_tool(&self) -> Option<&ShapeTool> {
        match self {
            Self::Shapes(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_shape_tool_mut(&mut self) -> Option<&mut ShapeTool> {
        match self {
            Self::Shapes(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_freehand_tool(&self) -> Option<&FreehandTool> {
        match self {
            Self::Freehand(tool) => Some(tool),
            _ => None,
        }
    }

    /// Build the tool for a canvas mode
    pub fn for_mode(mode: crate::canvas::Mode, config: &EditorConfig) -> Self {
        match mode {
            crate::canvas::Mode::Freehand => Self::Freehand(FreehandTool::new()),
            crate::canvas::Mode::Lines => Self::Lines(LineTool::new()),
            crate::canvas::Mode::Shapes => Self::Shapes(ShapeTool::new(config)),
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Freehand(tool) => tool.name(),
            Self::Lines(tool) => tool.name(),
            Self::Shapes(tool) => tool.name(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Freehand(tool) => tool.current_state_name(),
            Self::Lines(tool) => tool.current_state_name(),
            Self::Shapes(tool) => tool.current_state_name(),
        }
    }

    fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        modifier: Modifier,
        clicks: ClickCount,
        ctx: &mut ToolContext<'_>,
    ) {
        match self {
            Self::Freehand(tool) => tool.on_pointer_down(pos, button, modifier, clicks, ctx),
            Self::Lines(tool) => tool.on_pointer_down(pos, button, modifier, clicks, ctx),
            Self::Shapes(tool) => tool.on_pointer_down(pos, button, modifier, clicks, ctx),
        }
    }

    fn on_pointer_move(
        &mut self,
        pos: Point,
        held: Option<PointerButton>,
        modifier: Modifier,
        ctx: &mut ToolContext<'_>,
    ) {
        match self {
            Self::Freehand(tool) => tool.on_pointer_move(pos, held, modifier, ctx),
            Self::Lines(tool) => tool.on_pointer_move(pos, held, modifier, ctx),
            Self::Shapes(tool) => tool.on_pointer_move(pos, held, modifier, ctx),
        }
    }

    fn on_key(&mut self, key: ArrowKey, modifier: Modifier, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Freehand(tool) => tool.on_key(key, modifier, ctx),
            Self::Lines(tool) => tool.on_key(key, modifier, ctx),
            Self::Shapes(tool) => tool.on_key(key, modifier, ctx),
        }
    }

    fn on_tick(&mut self, ctx: &mut ToolContext<'_>) {
        match self {
            Self::Freehand(tool) => tool.on_tick(ctx),
            Self::Lines(tool) => tool.on_tick(ctx),
            Self::Shapes(tool) => tool.on_tick(ctx),
        }
    }
}
