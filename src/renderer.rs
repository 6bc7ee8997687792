// src/renderer.rs
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use log::warn;
use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::image::{BackgroundImage, fit_centered};
use crate::surface::{Geometry, Primitive};

/// Segments used to approximate a full ellipse
const ELLIPSE_SEGMENTS: usize = 64;

/// Paints one canvas: background image, primitives and status text.
pub struct Renderer {
    ctx: egui::Context,
    background: Option<egui::TextureHandle>,
    fill: Color32,
}

impl Renderer {
    /// Creates a renderer that paints on `fill` until an image is loaded
    pub fn new(ctx: &egui::Context, fill: Color32) -> Self {
        Self {
            ctx: ctx.clone(),
            background: None,
            fill,
        }
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Upload `image` as this canvas's background, replacing any previous one
    pub fn set_background(&mut self, image: &BackgroundImage) {
        let texture = self.ctx.load_texture(
            image.name(),
            image.to_color_image(),
            egui::TextureOptions::default(),
        );
        self.background = Some(texture);
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Renders the canvas into `rect`
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen rectangle of the canvas; scene
    ///         coordinates are relative to its top-left corner
    ///     canvas (Canvas): What to draw
    pub fn render(&self, painter: &egui::Painter, rect: Rect, canvas: &Canvas) {
        painter.rect_filled(rect, 0.0, self.fill);

        if let Some(texture) = &self.background {
            match fit_centered(texture.size_vec2(), rect, canvas.config().image_gutter) {
                Ok(image_rect) => {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture.id(), image_rect, uv, Color32::WHITE);
                }
                Err(err) => warn!("Background not drawn: {}", err),
            }
        }

        let offset = rect.min.to_vec2();
        let painter = painter.with_clip_rect(rect);
        for primitive in canvas.scene().primitives() {
            painter.extend(primitive_shapes(primitive, offset));
        }

        self.render_status(&painter, rect, canvas);
    }

    fn render_status(&self, painter: &egui::Painter, rect: Rect, canvas: &Canvas) {
        let font = FontId::monospace(12.0);
        let margin = Vec2::splat(6.0);

        if let Some(cursor) = canvas.cursor_text() {
            painter.text(
                rect.left_bottom() + Vec2::new(margin.x, -margin.y),
                Align2::LEFT_BOTTOM,
                cursor,
                font.clone(),
                Color32::DARK_GRAY,
            );
        }

        if let Some(report) = canvas.center_report() {
            painter.text(
                rect.left_top() + margin,
                Align2::LEFT_TOP,
                report.to_string(),
                font.clone(),
                report.color,
            );
        }

        painter.text(
            rect.right_bottom() - margin,
            Align2::RIGHT_BOTTOM,
            format!("{} | {}", canvas.mode(), canvas.state_name()),
            font,
            Color32::DARK_GRAY,
        );
    }
}

/// egui shapes for one primitive, shifted by `offset` into screen space
pub fn primitive_shapes(primitive: &Primitive, offset: Vec2) -> Vec<Shape> {
    let stroke = Stroke::new(primitive.width(), primitive.outline());
    let fill = primitive.fill();

    match *primitive.geometry() {
        Geometry::Line { from, to } => vec![Shape::line_segment([from + offset, to + offset], stroke)],
        Geometry::Rectangle(rect) => {
            let rect = rect.translate(offset);
            let mut shapes = Vec::with_capacity(2);
            if let Some(fill) = fill {
                shapes.push(Shape::rect_filled(rect, 0.0, fill));
            }
            shapes.push(Shape::rect_stroke(rect, 0.0, stroke));
            shapes
        }
        Geometry::Oval(rect) => {
            let points = arc_points(rect.translate(offset), 0.0, 360.0, ELLIPSE_SEGMENTS);
            outlined_polygon(points, fill, stroke)
        }
        Geometry::Arc { rect, start_deg, extent_deg } => {
            let rect = rect.translate(offset);
            let segments = ((extent_deg.abs() / 360.0) * ELLIPSE_SEGMENTS as f32).ceil().max(2.0) as usize;
            let mut points = vec![rect.center()];
            points.extend(arc_points(rect, start_deg, extent_deg, segments));
            outlined_polygon(points, fill, stroke)
        }
    }
}

fn outlined_polygon(points: Vec<Pos2>, fill: Option<Color32>, stroke: Stroke) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(2);
    if let Some(fill) = fill {
        shapes.push(Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
    }
    shapes.push(Shape::closed_line(points, stroke));
    shapes
}

/// Points along the ellipse inscribed in `rect`, from `start_deg` through
/// `start_deg + extent_deg`. Angles run counter-clockwise on screen, so y is
/// flipped.
pub fn arc_points(rect: Rect, start_deg: f32, extent_deg: f32, segments: usize) -> Vec<Pos2> {
    let center = rect.center();
    let radius = rect.size() / 2.0;
    let full_circle = extent_deg.abs() >= 360.0;
    let count = if full_circle { segments } else { segments + 1 };

    (0..count)
        .map(|i| {
            let t = (start_deg + extent_deg * i as f32 / segments as f32) / 360.0 * TAU;
            Pos2::new(center.x + radius.x * t.cos(), center.y - radius.y * t.sin())
        })
        .collect()
}
