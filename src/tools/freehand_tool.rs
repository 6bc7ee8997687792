use log::warn;

use crate::input::{ClickCount, Modifier, PointerButton};
use crate::point::Point;
use crate::pointer::PointerHistory;
use crate::surface::{DrawingSurface, Geometry, PrimitiveId, Style};
use crate::tools::{Tool, ToolContext};

pub const FREEHAND_TAG: &str = "freehand";

/// Draws a segment for every primary-button drag event. No undo.
#[derive(Debug, Clone, Default)]
pub struct FreehandTool {
    segment_count: usize,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn on_press(&mut self, history: &mut PointerHistory, pos: Point) {
        history.record_click(pos);
    }

    /// Segment from the last recorded position to `pos`
    pub fn on_drag(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        style: Style,
    ) -> Option<PrimitiveId> {
        if history.is_idle() {
            history.record_click(pos);
            return None;
        }

        let geometry = Geometry::Line {
            from: history.start().to_pos2(),
            to: pos.to_pos2(),
        };
        let id = match surface.create_primitive(geometry, style, &[FREEHAND_TAG]) {
            Ok(id) => id,
            Err(err) => {
                warn!("Freehand segment not drawn: {}", err);
                return None;
            }
        };
        self.segment_count += 1;
        history.record_click(pos);
        Some(id)
    }
}

impl Tool for FreehandTool {
    fn name(&self) -> &'static str {
        "Freehand"
    }

    fn current_state_name(&self) -> &'static str {
        "Drawing"
    }

    fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        _modifier: Modifier,
        _clicks: ClickCount,
        ctx: &mut ToolContext<'_>,
    ) {
        if button == PointerButton::Primary {
            self.on_press(ctx.history, pos);
        }
    }

    fn on_pointer_move(
        &mut self,
        pos: Point,
        held: Option<PointerButton>,
        _modifier: Modifier,
        ctx: &mut ToolContext<'_>,
    ) {
        if held == Some(PointerButton::Primary) {
            let style = ctx.settings.style();
            self.on_drag(ctx.surface, ctx.history, pos, style);
        }
    }
}
