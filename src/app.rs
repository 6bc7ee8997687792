use log::{error, info};
use std::time::Duration;

use crate::canvas::{Canvas, Mode};
use crate::config::EditorConfig;
use crate::file_handler::FileHandler;
use crate::image::BackgroundImage;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::shape::{ShapeDimensions, ShapeKind};
use crate::state::CanvasSettings;

/// Size of the freehand/lines canvas
pub const DRAW_CANVAS_SIZE: egui::Vec2 = egui::vec2(640.0, 640.0);
/// Size of the shapes canvas
pub const SHAPE_CANVAS_SIZE: egui::Vec2 = egui::vec2(400.0, 500.0);

/// Operator settings restored between sessions.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedSettings {
    draw: Option<CanvasSettings>,
    shapes: Option<CanvasSettings>,
}

/// One canvas together with the pieces that connect it to egui
pub struct CanvasView {
    pub canvas: Canvas,
    pub input: InputHandler,
    pub renderer: Renderer,
}

impl CanvasView {
    fn new(ctx: &egui::Context, canvas: Canvas, size: egui::Vec2, fill: egui::Color32) -> Self {
        Self {
            canvas,
            input: InputHandler::new(egui::Rect::from_min_size(egui::Pos2::ZERO, size)),
            renderer: Renderer::new(ctx, fill),
        }
    }

    /// Route this frame's input to the canvas and paint it
    pub fn show(&mut self, ui: &mut egui::Ui, size: egui::Vec2, now: f64) {
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        self.input.set_canvas_rect(response.rect);

        for event in self.input.process_input(ui.ctx()) {
            self.canvas.handle_event(&event, now);
        }
        self.canvas.tick(now);

        self.renderer.render(&painter, response.rect, &self.canvas);
    }
}

pub struct AnnotateApp {
    config: EditorConfig,
    draw: CanvasView,
    shapes: CanvasView,
    file_handler: FileHandler,
    image_path: String,
    last_error: Option<String>,
}

impl AnnotateApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig, draw_mode: Mode) -> Self {
        let persisted: PersistedSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let draw_settings = persisted
            .draw
            .unwrap_or_else(|| CanvasSettings::from_config(&config));
        let shape_settings = persisted
            .shapes
            .unwrap_or_else(|| CanvasSettings::from_config(&config));

        let draw = CanvasView::new(
            &cc.egui_ctx,
            Canvas::with_settings(draw_mode, draw_settings, config.clone()),
            DRAW_CANVAS_SIZE,
            egui::Color32::from_gray(0xcc),
        );
        let shapes = CanvasView::new(
            &cc.egui_ctx,
            Canvas::with_settings(Mode::Shapes, shape_settings, config.clone()),
            SHAPE_CANVAS_SIZE,
            egui::Color32::from_rgb(0, 255, 255),
        );

        Self {
            config,
            draw,
            shapes,
            file_handler: FileHandler::new(),
            image_path: String::new(),
            last_error: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn draw_view(&self) -> &CanvasView {
        &self.draw
    }

    pub fn shape_view(&self) -> &CanvasView {
        &self.shapes
    }

    /// Both canvases at once, for laying them out side by side
    pub fn views_mut(&mut self) -> (&mut CanvasView, &mut CanvasView) {
        (&mut self.draw, &mut self.shapes)
    }

    pub fn image_path_mut(&mut self) -> &mut String {
        &mut self.image_path
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Line color for both canvases
    pub fn set_line_color(&mut self, color: egui::Color32) {
        self.draw.canvas.set_line_color(color);
        self.shapes.canvas.set_line_color(color);
    }

    /// Line width for both canvases
    pub fn set_line_width(&mut self, width: f32) {
        self.draw.canvas.set_line_width(width);
        self.shapes.canvas.set_line_width(width);
    }

    pub fn set_next_shape(&mut self, kind: ShapeKind) {
        self.shapes.canvas.set_next_shape(kind);
    }

    pub fn set_dimensions(&mut self, kind: ShapeKind, dims: ShapeDimensions) {
        self.shapes.canvas.set_dimensions(kind, dims);
    }

    /// Load the image named in the path field onto the shapes canvas
    pub fn open_image(&mut self) {
        let path = self.image_path.trim().to_owned();
        match BackgroundImage::load(&path) {
            Ok(image) => self.set_background(&image),
            Err(err) => {
                error!("Cannot open {}: {}", path, err);
                self.last_error = Some(format!("{path}: {err}"));
            }
        }
    }

    fn set_background(&mut self, image: &BackgroundImage) {
        info!("Background set to {}", image.name());
        self.shapes.renderer.set_background(image);
        self.last_error = None;
    }

    pub fn clear_background(&mut self) {
        self.shapes.renderer.clear_background();
        self.file_handler.clear_processed_files();
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: f64) {
        let due = [self.draw.canvas.next_due(), self.shapes.canvas.next_due()]
            .into_iter()
            .flatten()
            .reduce(f64::min);
        if let Some(due) = due {
            ctx.request_repaint_after(Duration::from_secs_f64((due - now).max(0.0)));
        }
    }
}

impl eframe::App for AnnotateApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedSettings {
            draw: Some(self.draw.canvas.settings().clone()),
            shapes: Some(self.shapes.canvas.settings().clone()),
        };
        eframe::set_value(storage, eframe::APP_KEY, &persisted);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Seconds since the app started, from egui's clock
        let now = ctx.input(|i| i.time);

        self.file_handler.preview_files_being_dropped(ctx);
        if let Some(image) = self.file_handler.take_dropped_images(ctx).pop() {
            self.set_background(&image);
        }

        tools_panel(self, ctx);
        central_panel(self, ctx, now);

        self.schedule_repaint(ctx, now);
    }
}
