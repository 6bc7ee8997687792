use log::{debug, warn};

use crate::input::{ClickCount, Modifier, PointerButton};
use crate::point::Point;
use crate::pointer::PointerHistory;
use crate::surface::{DrawingSurface, Geometry, PrimitiveId, Style};
use crate::tools::{Tool, ToolContext};

pub const LINE_TAG: &str = "line";

/// Click-to-click polyline construction with single-step undo.
///
/// Segments are tagged `line1`, `line2`, ... for the lifetime of the canvas;
/// numbers are not reused after an undo.
#[derive(Debug, Clone, Default)]
pub struct LineTool {
    line_count: usize,
    segment_tags: Vec<String>,
    drawing: bool,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags of the segments of the open polyline, oldest first
    pub fn segment_tags(&self) -> &[String] {
        &self.segment_tags
    }

    /// Segments ever drawn on this canvas
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    fn draw_segment(
        &mut self,
        surface: &mut dyn DrawingSurface,
        from: Point,
        to: Point,
        style: Style,
    ) -> Option<PrimitiveId> {
        self.line_count += 1;
        let tag = format!("{LINE_TAG}{}", self.line_count);
        let geometry = Geometry::Line {
            from: from.to_pos2(),
            to: to.to_pos2(),
        };
        match surface.create_primitive(geometry, style, &[LINE_TAG, tag.as_str()]) {
            Ok(id) => {
                self.segment_tags.push(tag);
                Some(id)
            }
            Err(err) => {
                warn!("Segment {} not drawn: {}", tag, err);
                None
            }
        }
    }

    /// The first click only anchors the polyline; later clicks draw a
    /// segment from the previous click.
    pub fn on_click(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        style: Style,
    ) -> Option<PrimitiveId> {
        self.drawing = true;
        if history.is_idle() {
            history.record_polyline_click(pos);
            return None;
        }

        let id = self.draw_segment(surface, history.start(), pos, style)?;
        history.record_polyline_click(pos);
        Some(id)
    }

    /// Close the polyline back to its first point and forget it
    pub fn on_double_click(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        style: Style,
    ) -> Option<PrimitiveId> {
        let closing = history
            .first()
            .and_then(|first| self.draw_segment(surface, pos, first, style));

        history.reset();
        self.segment_tags.clear();
        self.drawing = false;
        closing
    }

    /// Remove the newest segment and step the polyline back one vertex.
    /// Returns false when nothing has been drawn yet.
    pub fn on_undo(&mut self, surface: &mut dyn DrawingSurface, history: &mut PointerHistory) -> bool {
        if history.is_idle() {
            return false;
        }

        if let Some(tag) = self.segment_tags.pop() {
            let removed = surface.delete_by_tag(&tag);
            debug!("Undo removed {} ({} primitive(s))", tag, removed);
        }
        history.pop_point();
        true
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Lines"
    }

    fn current_state_name(&self) -> &'static str {
        if self.drawing { "Drawing" } else { "Idle" }
    }

    fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        _modifier: Modifier,
        clicks: ClickCount,
        ctx: &mut ToolContext<'_>,
    ) {
        let style = ctx.settings.style();
        match (button, clicks) {
            (PointerButton::Primary, ClickCount::Single) => {
                self.on_click(ctx.surface, ctx.history, pos, style);
            }
            (PointerButton::Primary, ClickCount::Double) => {
                self.on_double_click(ctx.surface, ctx.history, pos, style);
            }
            (PointerButton::Secondary, _) => {
                self.on_undo(ctx.surface, ctx.history);
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        _pos: Point,
        _held: Option<PointerButton>,
        _modifier: Modifier,
        _ctx: &mut ToolContext<'_>,
    ) {
    }
}
