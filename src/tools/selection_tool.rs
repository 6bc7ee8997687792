use log::debug;

use crate::point::Point;
use crate::surface::{DrawingSurface, PrimitiveId};
use crate::tools::ShapeTool;

/// Routes a secondary click on the shape canvas to select or unselect
pub struct SelectionController;

impl SelectionController {
    /// With `shift` held the selection reverts to the last created shape and
    /// flashes; otherwise the nearest shape under `pos` is selected.
    pub fn toggle(
        tool: &mut ShapeTool,
        surface: &mut dyn DrawingSurface,
        pos: Point,
        shift: bool,
        now: f64,
    ) -> Option<PrimitiveId> {
        if shift {
            debug!("Unselect requested at {}", pos);
            tool.unselect(surface, now)
        } else {
            debug!("Select requested at {}", pos);
            tool.select(surface, pos)
        }
    }
}
