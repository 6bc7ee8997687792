use egui::{Color32, Pos2, Rect, Vec2};
use std::fmt;
use thiserror::Error;

mod scene;

pub use scene::{Primitive, Scene};

/// Opaque handle to a primitive owned by a drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(usize);

impl PrimitiveId {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Line,
    Oval,
    Rectangle,
    Arc,
}

/// Coordinates of a primitive. Angles follow the usual canvas convention:
/// degrees counter-clockwise from three o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Line { from: Pos2, to: Pos2 },
    Oval(Rect),
    Rectangle(Rect),
    Arc { rect: Rect, start_deg: f32, extent_deg: f32 },
}

impl Geometry {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Geometry::Line { .. } => PrimitiveKind::Line,
            Geometry::Oval(_) => PrimitiveKind::Oval,
            Geometry::Rectangle(_) => PrimitiveKind::Rectangle,
            Geometry::Arc { .. } => PrimitiveKind::Arc,
        }
    }

    /// Axis-aligned bounds. For arcs this is the box of the full ellipse.
    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Line { from, to } => Rect::from_two_pos(*from, *to),
            Geometry::Oval(rect) | Geometry::Rectangle(rect) | Geometry::Arc { rect, .. } => *rect,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Geometry::Line { from, to } => from.is_finite() && to.is_finite(),
            Geometry::Oval(rect) | Geometry::Rectangle(rect) => rect.is_finite(),
            Geometry::Arc { rect, start_deg, extent_deg } => {
                rect.is_finite() && start_deg.is_finite() && extent_deg.is_finite()
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Geometry::Line { from, to } => {
                *from += delta;
                *to += delta;
            }
            Geometry::Oval(rect) | Geometry::Rectangle(rect) | Geometry::Arc { rect, .. } => {
                *rect = rect.translate(delta);
            }
        }
    }

    /// Scale every coordinate about `origin`
    pub fn scale(&mut self, origin: Pos2, factor_x: f32, factor_y: f32) {
        let scale_pos = |pos: Pos2| {
            Pos2::new(
                origin.x + (pos.x - origin.x) * factor_x,
                origin.y + (pos.y - origin.y) * factor_y,
            )
        };
        match self {
            Geometry::Line { from, to } => {
                *from = scale_pos(*from);
                *to = scale_pos(*to);
            }
            Geometry::Oval(rect) | Geometry::Rectangle(rect) | Geometry::Arc { rect, .. } => {
                *rect = Rect::from_two_pos(scale_pos(rect.min), scale_pos(rect.max));
            }
        }
    }
}

/// Visual properties given at creation time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub outline: Color32,
    pub width: f32,
}

impl Style {
    pub fn new(outline: Color32, width: f32) -> Self {
        Self { outline, width }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleProperty {
    Outline,
    /// `None` means unfilled
    Fill,
}

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("no primitive with id {0}")]
    UnknownPrimitive(PrimitiveId),

    #[error("geometry has non-finite coordinates: {0:?}")]
    InvalidGeometry(Geometry),

    #[error("scale factors must be positive and finite, got ({factor_x}, {factor_y})")]
    DegenerateScale { factor_x: f32, factor_y: f32 },
}

/// The capability the interaction core needs from a 2D drawing surface.
///
/// Implementations own all primitive geometry. The core only computes raw
/// coordinates at creation time and reads bounds back after transforms.
pub trait DrawingSurface {
    /// Create a primitive. `tags[0]` is conventionally the kind tag and
    /// `tags[1]` the unique instance tag.
    fn create_primitive(
        &mut self,
        geometry: Geometry,
        style: Style,
        tags: &[&str],
    ) -> Result<PrimitiveId, SurfaceError>;

    fn move_primitive(&mut self, id: PrimitiveId, dx: f32, dy: f32) -> Result<(), SurfaceError>;

    fn scale_primitive(
        &mut self,
        id: PrimitiveId,
        origin: Pos2,
        factor_x: f32,
        factor_y: f32,
    ) -> Result<(), SurfaceError>;

    fn delete_primitive(&mut self, id: PrimitiveId) -> Result<(), SurfaceError>;

    /// Delete every primitive carrying `tag`, returning how many went
    fn delete_by_tag(&mut self, tag: &str) -> usize;

    fn bounds(&self, id: PrimitiveId) -> Result<Rect, SurfaceError>;

    fn set_style(
        &mut self,
        id: PrimitiveId,
        property: StyleProperty,
        value: Option<Color32>,
    ) -> Result<(), SurfaceError>;

    fn style(&self, id: PrimitiveId, property: StyleProperty) -> Result<Option<Color32>, SurfaceError>;

    /// Primitives within `halo` of `pos`, nearest first
    fn find_nearest(&self, pos: Pos2, halo: f32) -> Vec<PrimitiveId>;

    fn find_with_tag(&self, tag: &str) -> Vec<PrimitiveId>;

    fn tags(&self, id: PrimitiveId) -> Result<Vec<String>, SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_scale_about_center_keeps_center() {
        let mut geometry = Geometry::Oval(Rect::from_min_max(pos2(90.0, 90.0), pos2(110.0, 110.0)));
        geometry.scale(pos2(100.0, 100.0), 2.0, 2.0);
        let bounds = geometry.bounds();
        assert_eq!(bounds.min, pos2(80.0, 80.0));
        assert_eq!(bounds.max, pos2(120.0, 120.0));
    }

    #[test]
    fn test_line_bounds_are_normalized() {
        let geometry = Geometry::Line { from: pos2(30.0, 5.0), to: pos2(10.0, 25.0) };
        let bounds = geometry.bounds();
        assert_eq!(bounds.min, pos2(10.0, 5.0));
        assert_eq!(bounds.max, pos2(30.0, 25.0));
    }

    #[test]
    fn test_translate_arc_keeps_angles() {
        let mut geometry = Geometry::Arc {
            rect: Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0)),
            start_deg: 90.0,
            extent_deg: 90.0,
        };
        geometry.translate(Vec2::new(1.0, -1.0));
        match geometry {
            Geometry::Arc { rect, start_deg, extent_deg } => {
                assert_eq!(rect.min, pos2(1.0, -1.0));
                assert_eq!(start_deg, 90.0);
                assert_eq!(extent_deg, 90.0);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
