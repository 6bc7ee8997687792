use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::point::Point;
use crate::surface::{Geometry, PrimitiveKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeKindError {
    #[error("unrecognized shape kind '{0}'")]
    Unknown(String),
}

/// The annotation shapes that can be placed on the shape canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Oval,
    Rectangle,
    Arc,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Oval, ShapeKind::Rectangle, ShapeKind::Arc];

    /// Kind tag; also the prefix of every instance tag
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Oval => "oval",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Arc => "arc",
        }
    }

    pub fn primitive_kind(self) -> PrimitiveKind {
        match self {
            ShapeKind::Oval => PrimitiveKind::Oval,
            ShapeKind::Rectangle => PrimitiveKind::Rectangle,
            ShapeKind::Arc => PrimitiveKind::Arc,
        }
    }

    /// Geometry for a shape of this kind filling `rect`
    pub fn geometry(self, rect: Rect, arc: ArcAngles) -> Geometry {
        match self {
            ShapeKind::Oval => Geometry::Oval(rect),
            ShapeKind::Rectangle => Geometry::Rectangle(rect),
            ShapeKind::Arc => Geometry::Arc {
                rect,
                start_deg: arc.start_deg,
                extent_deg: arc.extent_deg,
            },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ShapeKindError::Unknown(s.to_owned()))
    }
}

/// Default angular parameters for arcs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcAngles {
    pub start_deg: f32,
    pub extent_deg: f32,
}

impl Default for ArcAngles {
    fn default() -> Self {
        Self {
            start_deg: 90.0,
            extent_deg: 90.0,
        }
    }
}

/// Full width and height of a new shape's bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDimensions {
    pub width: i32,
    pub height: i32,
}

impl Default for ShapeDimensions {
    fn default() -> Self {
        Self::new(40, 40)
    }
}

impl ShapeDimensions {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn half_extents(self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Bounding box centered on `center`
    pub fn rect_around(self, center: Point) -> Rect {
        let half = self.half_extents();
        let center = center.to_pos2();
        Rect::from_min_max(
            Pos2::new(center.x - half.x, center.y - half.y),
            Pos2::new(center.x + half.x, center.y + half.y),
        )
    }

    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Operator-settable dimensions, one entry per kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSizes {
    pub oval: ShapeDimensions,
    pub rectangle: ShapeDimensions,
    pub arc: ShapeDimensions,
}

impl ShapeSizes {
    pub fn get(&self, kind: ShapeKind) -> ShapeDimensions {
        match kind {
            ShapeKind::Oval => self.oval,
            ShapeKind::Rectangle => self.rectangle,
            ShapeKind::Arc => self.arc,
        }
    }

    pub fn get_mut(&mut self, kind: ShapeKind) -> &mut ShapeDimensions {
        match kind {
            ShapeKind::Oval => &mut self.oval,
            ShapeKind::Rectangle => &mut self.rectangle,
            ShapeKind::Arc => &mut self.arc,
        }
    }

    pub fn set(&mut self, kind: ShapeKind, dims: ShapeDimensions) {
        *self.get_mut(kind) = dims;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("oval".parse::<ShapeKind>(), Ok(ShapeKind::Oval));
        assert_eq!("rectangle".parse::<ShapeKind>(), Ok(ShapeKind::Rectangle));
        assert_eq!("arc".parse::<ShapeKind>(), Ok(ShapeKind::Arc));
        assert_eq!(
            "circle".parse::<ShapeKind>(),
            Err(ShapeKindError::Unknown("circle".to_owned()))
        );
    }

    #[test]
    fn test_rect_around_uses_half_extents() {
        let rect = ShapeDimensions::new(20, 30).rect_around(Point::new(100, 100));
        assert_eq!(rect.min, Pos2::new(90.0, 85.0));
        assert_eq!(rect.max, Pos2::new(110.0, 115.0));
    }

    #[test]
    fn test_sizes_are_independent_per_kind() {
        let mut sizes = ShapeSizes::default();
        sizes.set(ShapeKind::Arc, ShapeDimensions::new(60, 20));
        assert_eq!(sizes.get(ShapeKind::Arc), ShapeDimensions::new(60, 20));
        assert_eq!(sizes.get(ShapeKind::Oval), ShapeDimensions::default());
    }

    #[test]
    fn test_arc_geometry_carries_angles() {
        let rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(10.0, 10.0));
        let geometry = ShapeKind::Arc.geometry(rect, ArcAngles::default());
        assert_eq!(geometry.kind(), ShapeKind::Arc.primitive_kind());
        assert_eq!(
            geometry,
            Geometry::Arc { rect, start_deg: 90.0, extent_deg: 90.0 }
        );
    }

    #[test]
    fn test_every_kind_maps_to_its_primitive() {
        let rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(4.0, 4.0));
        for kind in ShapeKind::ALL {
            assert_eq!(kind.geometry(rect, ArcAngles::default()).kind(), kind.primitive_kind());
            assert_eq!(kind.to_string().parse::<ShapeKind>(), Ok(kind));
        }
    }
}
