//! Data models for the annotation canvas.

mod annotation;
mod category;
mod grid;

pub use annotation::{AnnotationBox, BoundingRect, Corner, Point, proposals_above};
pub use category::{ClassDefinition, ClassTable};
pub use grid::{GridLine, GridOverlay};
