#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod config;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod image;
pub mod input;
pub mod panels;
pub mod point;
pub mod pointer;
pub mod registry;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod surface;
pub mod tools;
pub mod util;

pub use app::AnnotateApp;
pub use canvas::{Canvas, Mode};
pub use config::{ConfigError, EditorConfig};
pub use input::{InputEvent, InputHandler};
pub use point::Point;
pub use pointer::PointerHistory;
pub use registry::{ShapeRecord, ShapeRegistry};
pub use renderer::Renderer;
pub use shape::{ShapeDimensions, ShapeKind};
pub use state::CanvasSettings;
pub use surface::{DrawingSurface, PrimitiveId, Scene, SurfaceError};
pub use tools::{CenterReport, LineTool, SelectionController, ShapeTool, Tool};
