use egui::Pos2;

use crate::surface::Geometry;

/// Distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Distance used for nearest-primitive lookup.
///
/// Lines measure to the segment. Closed shapes measure to their bounding
/// box, so any point inside the box is at distance zero.
pub fn distance_to_geometry(point: Pos2, geometry: &Geometry) -> f32 {
    match geometry {
        Geometry::Line { from, to } => distance_to_line_segment(point, *from, *to),
        Geometry::Oval(rect) | Geometry::Rectangle(rect) | Geometry::Arc { rect, .. } => {
            rect.distance_to_pos(point)
        }
    }
}
