//! heliobox - interactive bounding-box annotation canvas
//!
//! Draw, move and resize class-labelled boxes over a raster image (typically a
//! solar disk patch), with an optional heliographic grid drawn underneath.
//! The [`canvas::AnnotationCanvas`] component owns the interaction state and
//! hands the edited box list back to its host after every gesture.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod hit_test;
pub mod interaction;
pub mod model;
pub mod render;
pub mod scene_file;
pub mod solar;

pub use canvas::AnnotationCanvas;
pub use config::CanvasConfig;
pub use error::{CanvasError, SceneError};
pub use interaction::{CursorStyle, PointerOutcome};
pub use model::{AnnotationBox, BoundingRect, ClassDefinition, ClassTable, GridOverlay, Point};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
