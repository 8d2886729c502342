//! Error types for the canvas and its command line front end.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised synchronously by canvas operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// A draw gesture was attempted with no class selected.
    #[error("class required: select a class before drawing a box")]
    NoClassSelected,

    /// The requested class is not in the class table.
    #[error("Unknown class '{0}'")]
    UnknownClass(String),
}

/// Errors from loading, rendering or replaying a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Raster error: {0}")]
    Raster(#[from] heliobox_raster::RasterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}
