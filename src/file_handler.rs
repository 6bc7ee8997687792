use eframe::egui;
use log::{error, info, warn};
use std::path::Path;

use crate::image::BackgroundImage;

/// Turns files dropped on the window into background images
#[derive(Debug, Default)]
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode any image files dropped this frame. Files already seen are
    /// skipped.
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<BackgroundImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut images = Vec::new();

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if self.processed_files.contains(&file_name) {
                continue;
            }
            if !is_image_file(&file.mime, file.path.as_deref()) {
                warn!("Dropped file is not a supported image: {}", file_name);
                continue;
            }

            let loaded = if let Some(bytes) = &file.bytes {
                info!("Processing image from memory: {} ({} bytes)", file_name, bytes.len());
                BackgroundImage::from_bytes(&file_name, bytes)
            } else if let Some(path) = &file.path {
                BackgroundImage::load(path)
            } else {
                warn!("Dropped file has no accessible data: {}", file_name);
                continue;
            };

            match loaded {
                Ok(image) => {
                    images.push(image);
                    self.processed_files.push(file_name);
                }
                Err(err) => error!("Failed to load {}: {}", file_name, err),
            }
        }

        images
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping image:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }

    pub fn clear_processed_files(&mut self) {
        self.processed_files.clear();
    }
}

/// Image by MIME type, or by extension when the platform gives no MIME type
fn is_image_file(mime: &str, path: Option<&Path>) -> bool {
    if !mime.is_empty() {
        return mime == "image/png" || mime == "image/jpeg";
    }
    path.and_then(Path::extension)
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg"))
}
