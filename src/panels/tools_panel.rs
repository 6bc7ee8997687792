use egui;

use crate::AnnotateApp;
use crate::components::ShapeButton;
use crate::shape::{ShapeDimensions, ShapeKind};
use crate::tools::Tool;

pub fn tools_panel(app: &mut AnnotateApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Line");

            // Collect palette first to avoid borrowing issues
            let palette = app.config().palette.clone();
            let current_color = app.draw_view().canvas.settings().line_color;
            ui.horizontal_wrapped(|ui| {
                for entry in &palette {
                    let selected = entry.color == current_color;
                    let button = egui::Button::new("    ")
                        .fill(entry.color)
                        .stroke(if selected {
                            egui::Stroke::new(2.0, egui::Color32::WHITE)
                        } else {
                            egui::Stroke::NONE
                        });
                    if ui.add(button).on_hover_text(&entry.name).clicked() {
                        log::info!("Color selected from UI: {}", entry.name);
                        app.set_line_color(entry.color);
                    }
                }
            });

            let range = app.config().line_width_range();
            let mut width = app.draw_view().canvas.settings().line_width;
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui.add(egui::DragValue::new(&mut width).range(range).speed(0.1)).changed() {
                    app.set_line_width(width);
                }
            });
            ui.label(format!("Color: {}", app.draw_view().canvas.color_report()));

            ui.separator();
            ui.heading("Shapes");

            let next_shape = app.shape_view().canvas.settings().next_shape;
            ui.horizontal(|ui| {
                for kind in ShapeKind::ALL {
                    if ShapeButton::new(kind, kind == next_shape).show(ui).clicked() {
                        app.set_next_shape(kind);
                    }
                }
            });

            egui::Grid::new("shape_dimensions_grid")
                .num_columns(3)
                .spacing([12.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Shape");
                    ui.strong("Width");
                    ui.strong("Height");
                    ui.end_row();

                    for kind in ShapeKind::ALL {
                        let dims = app.shape_view().canvas.settings().shape_sizes.get(kind);
                        let (mut w, mut h) = (dims.width, dims.height);
                        ui.label(kind.name());
                        let changed_w = ui.add(egui::DragValue::new(&mut w).range(1..=1000)).changed();
                        let changed_h = ui.add(egui::DragValue::new(&mut h).range(1..=1000)).changed();
                        if changed_w || changed_h {
                            app.set_dimensions(kind, ShapeDimensions::new(w, h));
                        }
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.heading("Background");

            ui.horizontal(|ui| {
                ui.text_edit_singleline(app.image_path_mut());
                if ui.button("Open image").clicked() {
                    app.open_image();
                }
            });
            if app.shape_view().renderer.has_background() && ui.button("Clear image").clicked() {
                app.clear_background();
            }
            if let Some(err) = app.last_error() {
                ui.colored_label(egui::Color32::RED, err);
            }

            ui.separator();
            for view in [app.draw_view(), app.shape_view()] {
                let tool = view.canvas.tool();
                ui.label(format!("{}: {}", tool.name(), tool.current_state_name()));
            }
        });
}
