#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod editor;
pub mod error;
pub mod export;
pub mod gallery;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod item;
pub mod panels;
pub mod renderer;
pub mod scene;

pub use app::SketchApp;
pub use editor::{BrushConfig, Editor, Mode};
pub use error::SaveError;
pub use export::scene_to_svg;
pub use gallery::{ExportSink, Gallery, GalleryEntry};
pub use item::{HeuristicTextMeasure, ShapeItem, ShapeKind, TextMeasure};
pub use scene::Scene;
