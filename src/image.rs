use egui::{ColorImage, Rect, Vec2};
use log::{debug, info};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("cannot read image: {0}")]
    Read(#[from] std::io::Error),
    #[error("cannot decode image: {0}")]
    Decode(#[from] ::image::ImageError),
    #[error("viewport {0:?} has no room for an image")]
    EmptyViewport(Rect),
}

/// Decoded picture painted beneath a canvas's primitives.
///
/// Not part of the scene, so it is never hit-tested or moved.
#[derive(Clone)]
pub struct BackgroundImage {
    name: String,
    size: [usize; 2],
    rgba: Vec<u8>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl BackgroundImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackgroundError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = Self::from_bytes(&path.display().to_string(), &bytes)?;
        info!("Loaded background {} ({}x{})", image.name, image.size[0], image.size[1]);
        Ok(image)
    }

    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, BackgroundError> {
        let decoded = ::image::load_from_memory(bytes)?;
        debug!("Decoded {}: {}x{}", name, decoded.width(), decoded.height());
        let rgba = decoded.to_rgba8();
        Ok(Self {
            name: name.to_owned(),
            size: [rgba.width() as usize, rgba.height() as usize],
            rgba: rgba.into_raw(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width and height in pixels
    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(self.size, &self.rgba)
    }

    /// Where to paint the image inside `viewport`: centered, aspect ratio
    /// kept, `gutter` pixels clear on every side, and never larger than
    /// its natural size.
    pub fn fit_rect(&self, viewport: Rect, gutter: f32) -> Result<Rect, BackgroundError> {
        fit_centered(Vec2::new(self.size[0] as f32, self.size[1] as f32), viewport, gutter)
    }
}

pub(crate) fn fit_centered(natural: Vec2, viewport: Rect, gutter: f32) -> Result<Rect, BackgroundError> {
    let room = viewport.size() - Vec2::splat(2.0 * gutter);
    if room.x <= 0.0 || room.y <= 0.0 || natural.x <= 0.0 || natural.y <= 0.0 {
        return Err(BackgroundError::EmptyViewport(viewport));
    }

    let scale = (room.x / natural.x).min(room.y / natural.y).min(1.0);
    Ok(Rect::from_center_size(viewport.center(), natural * scale))
}
