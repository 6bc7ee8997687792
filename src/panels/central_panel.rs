use crate::AnnotateApp;
use crate::app::{DRAW_CANVAS_SIZE, SHAPE_CANVAS_SIZE};

pub fn central_panel(app: &mut AnnotateApp, ctx: &egui::Context, now: f64) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (draw, shapes) = app.views_mut();

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.label(format!("Draw ({})", draw.canvas.mode()));
                draw.show(ui, DRAW_CANVAS_SIZE, now);
            });
            ui.vertical(|ui| {
                ui.label("Shapes");
                shapes.show(ui, SHAPE_CANVAS_SIZE, now);
            });
        });
    });
}
