//! Draw commands executed by a [`Surface`](crate::Surface).

use crate::{Color, RasterImage};

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square of side `size` centered on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// A single drawing operation. A frame is a `Vec<DrawCommand>` painted in order,
/// so later commands overwrite earlier ones.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    /// Copy an image at native resolution with its top-left at `(x, y)`.
    Image { image: RasterImage, x: i32, y: i32 },
    /// Connect consecutive points with straight segments.
    Polyline {
        points: Vec<(f32, f32)>,
        color: Color,
        width: f32,
    },
    /// Outline a rectangle, optionally dashed with `[on, off]` lengths.
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
        dash: Option<[f32; 2]>,
    },
    FillRect { rect: Rect, color: Color },
    /// Single line of text whose layout box starts at `(x, y)`.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Short name used in debug logging.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::Image { .. } => "image",
            DrawCommand::Polyline { .. } => "polyline",
            DrawCommand::StrokeRect { .. } => "stroke_rect",
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::Text { .. } => "text",
        }
    }
}
