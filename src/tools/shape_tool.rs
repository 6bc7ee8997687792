use egui::Color32;
use log::{debug, info, warn};
use std::fmt;

use crate::config::EditorConfig;
use crate::input::{ArrowKey, ClickCount, Modifier, PointerButton};
use crate::point::Point;
use crate::pointer::PointerHistory;
use crate::registry::{ShapeRecord, ShapeRegistry};
use crate::shape::{ArcAngles, ShapeDimensions, ShapeKind};
use crate::surface::{DrawingSurface, PrimitiveId, Style, StyleProperty};
use crate::tools::{SelectionController, Tool, ToolContext};
use crate::util::{Scheduler, TaskHandle};

/// Center of the active shape as shown to the operator, drawn in the
/// shape's outline color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterReport {
    pub center: Point,
    pub color: Color32,
}

impl fmt::Display for CenterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "center:  {}, {}", self.center.x, self.center.y)
    }
}

#[derive(Debug, Clone, Copy)]
struct ShapeToolConfig {
    halo: f32,
    highlight_color: Color32,
    flash_delay_secs: f64,
    grow_factor: f32,
    shrink_factor: f32,
    arc: ArcAngles,
}

impl From<&EditorConfig> for ShapeToolConfig {
    fn from(config: &EditorConfig) -> Self {
        Self {
            halo: config.halo,
            highlight_color: config.highlight_color,
            flash_delay_secs: config.flash_delay_secs,
            grow_factor: config.grow_factor,
            shrink_factor: config.shrink_factor,
            arc: config.arc,
        }
    }
}

/// Creates annotation shapes and moves, nudges, resizes and selects them.
///
/// Every shape on the surface has exactly one [`ShapeRecord`]; both are made
/// together in [`ShapeTool::create_shape`] and never removed. Operations
/// that need a selection are no-ops without one.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    registry: ShapeRegistry,
    selected: Option<PrimitiveId>,
    /// Pointer position of the last resize event, separate from the click history
    last_motion: Point,
    center_report: Option<CenterReport>,
    flashes: Scheduler<PrimitiveId>,
    pending_flash: Option<(TaskHandle, PrimitiveId)>,
    config: ShapeToolConfig,
}

impl ShapeTool {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            registry: ShapeRegistry::new(),
            selected: None,
            last_motion: Point::default(),
            center_report: None,
            flashes: Scheduler::new(),
            pending_flash: None,
            config: config.into(),
        }
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn selected(&self) -> Option<PrimitiveId> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ShapeRecord> {
        self.selected.and_then(|id| self.registry.by_id(id))
    }

    pub fn center_report(&self) -> Option<CenterReport> {
        self.center_report
    }

    pub fn last_motion(&self) -> Point {
        self.last_motion
    }

    /// Shape whose highlight will be cleared by a pending timer, if any
    pub fn pending_flash(&self) -> Option<PrimitiveId> {
        self.pending_flash.map(|(_, id)| id)
    }

    /// When the next scheduled task is due, in host seconds
    pub fn next_due(&self) -> Option<f64> {
        self.flashes.next_due()
    }

    fn report_center(&mut self, center: Point, color: Color32) {
        self.center_report = Some(CenterReport { center, color });
    }

    /// Outline as the surface currently has it, falling back to the record
    fn outline_of(surface: &dyn DrawingSurface, record: &ShapeRecord) -> Color32 {
        surface
            .style(record.id, StyleProperty::Outline)
            .ok()
            .flatten()
            .unwrap_or(record.outline_color)
    }

    /// Place a new shape centered on `pos` and make it the selection.
    ///
    /// Returns `None`, leaving registry and selection untouched, when the
    /// dimensions are not positive or the surface refuses the primitive.
    pub fn create_shape(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        kind: ShapeKind,
        style: Style,
        dims: ShapeDimensions,
    ) -> Option<PrimitiveId> {
        history.record_click(pos);

        if !dims.is_valid() {
            warn!("Not creating {}: dimensions {}x{} are not positive", kind, dims.width, dims.height);
            return None;
        }

        let tag = self.registry.next_tag(kind);
        let geometry = kind.geometry(dims.rect_around(pos), self.config.arc);
        let id = match surface.create_primitive(geometry, style, &[kind.name(), tag.as_str()]) {
            Ok(id) => id,
            Err(err) => {
                warn!("Not creating {}: {}", tag, err);
                return None;
            }
        };

        self.registry.push(ShapeRecord {
            tag: tag.clone(),
            id,
            kind,
            center: pos,
            outline_color: style.outline,
            dimensions: dims,
        });
        self.report_center(pos, style.outline);
        self.selected = Some(id);
        self.last_motion = pos;
        info!("Created {} at {}", tag, pos);
        Some(id)
    }

    /// [`ShapeTool::create_shape`] for a kind given by name. Unknown names
    /// create nothing.
    pub fn create_shape_named(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        kind: &str,
        style: Style,
        dims: ShapeDimensions,
    ) -> Option<PrimitiveId> {
        match kind.parse::<ShapeKind>() {
            Ok(kind) => self.create_shape(surface, history, pos, kind, style, dims),
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Move the selection one unit step toward `pos`.
    ///
    /// The step is the sign of the motion since the previous event, so the
    /// speed does not depend on pointer velocity. With `constrain` only the
    /// axis with the larger motion moves.
    pub fn drag(
        &mut self,
        surface: &mut dyn DrawingSurface,
        history: &mut PointerHistory,
        pos: Point,
        constrain: bool,
    ) -> bool {
        let Some(id) = self.selected else {
            return false;
        };

        let previous = history.previous();
        let (mut dx, mut dy) = ((pos.x - previous.x).signum(), (pos.y - previous.y).signum());
        if constrain {
            if (pos.x - previous.x).abs() > (pos.y - previous.y).abs() {
                dy = 0;
            } else {
                dx = 0;
            }
        }
        history.set_previous(pos);

        if let Err(err) = surface.move_primitive(id, dx as f32, dy as f32) {
            warn!("Drag of {} failed: {}", id, err);
            return false;
        }

        // Resync the center from the surface so repeated steps cannot drift
        let center = match surface.bounds(id) {
            Ok(bounds) => Point::from_pos2(bounds.center()),
            Err(err) => {
                warn!("Cannot read bounds of {}: {}", id, err);
                return false;
            }
        };
        let Some(record) = self.registry.by_id_mut(id) else {
            warn!("Dragged primitive {} has no shape record", id);
            return false;
        };
        record.center = center;
        let record = record.clone();
        let color = Self::outline_of(surface, &record);
        self.report_center(center, color);
        true
    }

    /// Move the selection by exactly `(dx, dy)`
    pub fn nudge(&mut self, surface: &mut dyn DrawingSurface, dx: i32, dy: i32) -> bool {
        let Some(id) = self.selected else {
            return false;
        };

        if let Err(err) = surface.move_primitive(id, dx as f32, dy as f32) {
            warn!("Nudge of {} failed: {}", id, err);
            return false;
        }
        let Some(record) = self.registry.by_id_mut(id) else {
            warn!("Nudged primitive {} has no shape record", id);
            return false;
        };
        record.center = record.center.offset(dx, dy);
        let record = record.clone();
        let color = Self::outline_of(surface, &record);
        self.report_center(record.center, color);
        true
    }

    /// Grow the selection while the pointer moves up, shrink it while it
    /// moves down. Scaling is about the recorded center.
    pub fn resize(&mut self, surface: &mut dyn DrawingSurface, pos: Point) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(center) = self.registry.by_id(id).map(|r| r.center) else {
            warn!("Resized primitive {} has no shape record", id);
            return false;
        };

        let factor = if pos.y < self.last_motion.y {
            Some(self.config.grow_factor)
        } else if pos.y > self.last_motion.y {
            Some(self.config.shrink_factor)
        } else {
            None
        };
        self.last_motion = pos;

        match factor {
            Some(factor) => match surface.scale_primitive(id, center.to_pos2(), factor, factor) {
                Ok(()) => true,
                Err(err) => {
                    warn!("Resize of {} failed: {}", id, err);
                    false
                }
            },
            None => false,
        }
    }

    /// Secondary click: Shift reverts to the last created shape, otherwise
    /// the nearest shape is selected.
    pub fn toggle_selection(
        &mut self,
        surface: &mut dyn DrawingSurface,
        pos: Point,
        shift: bool,
        now: f64,
    ) -> Option<PrimitiveId> {
        SelectionController::toggle(self, surface, pos, shift, now)
    }

    fn unhighlight_all(&self, surface: &mut dyn DrawingSurface) {
        for record in self.registry.iter() {
            if let Err(err) = surface.set_style(record.id, StyleProperty::Fill, None) {
                warn!("Cannot clear highlight of {}: {}", record.tag, err);
            }
        }
    }

    /// Registry entry for a primitive, found through its instance tag
    fn record_for(&self, surface: &dyn DrawingSurface, id: PrimitiveId) -> Option<&ShapeRecord> {
        let tags = surface.tags(id).ok()?;
        self.registry.get(tags.get(1)?)
    }

    /// Select the shape nearest `pos` within the halo and highlight it.
    /// A miss leaves the selection as it was.
    pub fn select(&mut self, surface: &mut dyn DrawingSurface, pos: Point) -> Option<PrimitiveId> {
        self.unhighlight_all(surface);

        let hit = surface
            .find_nearest(pos.to_pos2(), self.config.halo)
            .into_iter()
            .find_map(|id| self.record_for(surface, id).cloned());
        let Some(record) = hit else {
            info!("No shape found near {}", pos);
            return None;
        };

        if self.pending_flash.is_some_and(|(_, id)| id == record.id) {
            self.cancel_flash();
        }

        self.selected = Some(record.id);
        if let Err(err) = surface.set_style(record.id, StyleProperty::Fill, Some(self.config.highlight_color)) {
            warn!("Cannot highlight {}: {}", record.tag, err);
        }
        let color = Self::outline_of(surface, &record);
        self.report_center(record.center, color);
        debug!("Selected {}", record.tag);
        Some(record.id)
    }

    /// Revert the selection to the most recently created shape and flash it
    /// until `now + flash_delay_secs`.
    pub fn unselect(&mut self, surface: &mut dyn DrawingSurface, now: f64) -> Option<PrimitiveId> {
        self.unhighlight_all(surface);

        let last = self.registry.last()?.id;
        self.cancel_flash();

        if let Err(err) = surface.set_style(last, StyleProperty::Fill, Some(self.config.highlight_color)) {
            warn!("Cannot highlight {}: {}", last, err);
        }
        let handle = self.flashes.schedule(now + self.config.flash_delay_secs, last);
        self.pending_flash = Some((handle, last));
        self.selected = Some(last);
        debug!("Selection reverted to {}", last);
        Some(last)
    }

    fn cancel_flash(&mut self) {
        if let Some((handle, _)) = self.pending_flash.take() {
            self.flashes.cancel(handle);
        }
    }

    /// Run deferred highlight reverts that are due
    pub fn tick(&mut self, surface: &mut dyn DrawingSurface, now: f64) {
        for id in self.flashes.take_due(now) {
            if let Err(err) = surface.set_style(id, StyleProperty::Fill, None) {
                warn!("Cannot clear flash on {}: {}", id, err);
            }
            if self.pending_flash.is_some_and(|(_, pending)| pending == id) {
                self.pending_flash = None;
            }
        }
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        "Shapes"
    }

    fn current_state_name(&self) -> &'static str {
        if self.selected.is_some() {
            "HasSelection"
        } else {
            "NoSelection"
        }
    }

    fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        modifier: Modifier,
        _clicks: ClickCount,
        ctx: &mut ToolContext<'_>,
    ) {
        // No double click binding: the second press of one is a plain press
        match button {
            PointerButton::Primary => {
                let kind = ctx.settings.next_shape;
                let dims = ctx.settings.shape_sizes.get(kind);
                let style = ctx.settings.style();
                self.create_shape(ctx.surface, ctx.history, pos, kind, style, dims);
            }
            PointerButton::Secondary => {
                self.toggle_selection(ctx.surface, pos, modifier == Modifier::Shift, ctx.now);
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        pos: Point,
        _held: Option<PointerButton>,
        modifier: Modifier,
        ctx: &mut ToolContext<'_>,
    ) {
        match modifier {
            Modifier::Shift => {
                self.drag(ctx.surface, ctx.history, pos, false);
            }
            Modifier::Alt => {
                self.drag(ctx.surface, ctx.history, pos, true);
            }
            Modifier::Ctrl => {
                self.resize(ctx.surface, pos);
            }
            Modifier::None => {}
        }
    }

    fn on_key(&mut self, key: ArrowKey, modifier: Modifier, ctx: &mut ToolContext<'_>) {
        if modifier == Modifier::Shift {
            let (dx, dy) = key.delta();
            self.nudge(ctx.surface, dx, dy);
        }
    }

    fn on_tick(&mut self, ctx: &mut ToolContext<'_>) {
        self.tick(ctx.surface, ctx.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Scene;

    fn create(tool: &mut ShapeTool, scene: &mut Scene, history: &mut PointerHistory, pos: Point) -> PrimitiveId {
        tool.create_shape(
            scene,
            history,
            pos,
            ShapeKind::Oval,
            Style::new(Color32::RED, 1.0),
            ShapeDimensions::new(20, 20),
        )
        .unwrap()
    }

    #[test]
    fn test_center_report_text() {
        let report = CenterReport { center: Point::new(101, 100), color: Color32::RED };
        assert_eq!(report.to_string(), "center:  101, 100");
    }

    #[test]
    fn test_constrained_drag_locks_to_dominant_axis() {
        let mut scene = Scene::new();
        let mut history = PointerHistory::new();
        let mut tool = ShapeTool::new(&EditorConfig::default());
        let id = create(&mut tool, &mut scene, &mut history, Point::new(100, 100));

        // Mostly vertical motion: only y moves
        assert!(tool.drag(&mut scene, &mut history, Point::new(102, 110), true));
        let bounds = scene.bounds(id).unwrap();
        assert_eq!(bounds.min, egui::pos2(90.0, 91.0));

        // Equal motion falls to the vertical axis
        assert!(tool.drag(&mut scene, &mut history, Point::new(105, 113), true));
        assert_eq!(scene.bounds(id).unwrap().min, egui::pos2(90.0, 92.0));
        assert_eq!(tool.selected_record().unwrap().center, Point::new(100, 102));
    }

    #[test]
    fn test_nudge_is_exact() {
        let mut scene = Scene::new();
        let mut history = PointerHistory::new();
        let mut tool = ShapeTool::new(&EditorConfig::default());
        let id = create(&mut tool, &mut scene, &mut history, Point::new(50, 50));

        assert!(tool.nudge(&mut scene, 1, 0));
        assert!(tool.nudge(&mut scene, 0, -1));
        assert_eq!(scene.bounds(id).unwrap().min, egui::pos2(41.0, 39.0));
        assert_eq!(tool.selected_record().unwrap().center, Point::new(51, 49));
        assert_eq!(
            tool.center_report(),
            Some(CenterReport { center: Point::new(51, 49), color: Color32::RED })
        );
    }

    #[test]
    fn test_flash_is_cancelled_by_reselecting_same_shape() {
        let mut scene = Scene::new();
        let mut history = PointerHistory::new();
        let mut tool = ShapeTool::new(&EditorConfig::default());
        let id = create(&mut tool, &mut scene, &mut history, Point::new(50, 50));

        tool.unselect(&mut scene, 10.0);
        assert_eq!(tool.pending_flash(), Some(id));

        assert_eq!(tool.select(&mut scene, Point::new(50, 50)), Some(id));
        assert_eq!(tool.pending_flash(), None);

        // The old deadline passes without clearing the persistent highlight
        tool.tick(&mut scene, 11.0);
        assert_eq!(
            scene.style(id, StyleProperty::Fill).unwrap(),
            Some(EditorConfig::default().highlight_color)
        );
    }

    #[test]
    fn test_unselect_without_shapes() {
        let mut scene = Scene::new();
        let mut tool = ShapeTool::new(&EditorConfig::default());
        assert_eq!(tool.unselect(&mut scene, 0.0), None);
        assert_eq!(tool.selected(), None);
        assert_eq!(tool.current_state_name(), "NoSelection");
    }
}
