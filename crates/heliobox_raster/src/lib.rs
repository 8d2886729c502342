//! Software raster surface for the heliobox annotation canvas.
//!
//! Frames are described as an ordered list of [`DrawCommand`]s and executed
//! back to front onto a [`Surface`] backed by a `tiny-skia` pixmap.

pub mod color;
pub mod command;
pub mod error;
pub mod image;
pub mod surface;
pub mod text;

pub use color::Color;
pub use command::{DrawCommand, Rect};
pub use error::{RasterError, Result};
pub use image::RasterImage;
pub use surface::Surface;
pub use text::TextRasterizer;
