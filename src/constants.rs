//! Global constants for the heliobox canvas.
//!
//! These are the defaults behind [`CanvasConfig`](crate::config::CanvasConfig);
//! code that needs a tunable value should read it from the config instead.

use heliobox_raster::Color;

/// Geometry thresholds for boxes and handles (image pixels).
pub mod geometry {
    /// Smallest width or height a committed box may have.
    pub const MIN_BOX_SIZE: f32 = 10.0;
    /// Half-extent of the square hit region around each corner, and side
    /// length of the drawn handle squares.
    pub const HANDLE_SIZE: f32 = 8.0;
}

/// Stroke and label styling.
pub mod style {
    use super::Color;

    pub const STROKE_WIDTH: f32 = 2.0;
    /// Stroke width for the box under the pointer.
    pub const HOVER_STROKE_WIDTH: f32 = 3.0;
    pub const GRID_LINE_WIDTH: f32 = 1.0;
    /// Translucent white.
    pub const GRID_COLOR: Color = Color::rgba(255, 255, 255, 0x59);
    /// Reserved for the in-progress box; no class uses it.
    pub const PREVIEW_COLOR: Color = Color::rgb(0x00, 0xe5, 0xff);
    pub const PREVIEW_DASH: [f32; 2] = [6.0, 4.0];
    pub const HANDLE_COLOR: Color = Color::WHITE;
    pub const UNKNOWN_CLASS_COLOR: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const LABEL_FONT_SIZE: f32 = 14.0;
    /// Gap between a label's bottom edge and the box's top edge.
    pub const LABEL_GAP: f32 = 4.0;
}

/// Solar grid sampling.
pub mod grid {
    /// Spacing of the heliographic graticule in degrees.
    pub const STEP_DEG: f64 = 15.0;
    /// Outermost latitude line drawn (poles are skipped).
    pub const MAX_LATITUDE_DEG: f64 = 75.0;
    /// Points sampled along each grid line.
    pub const DEFAULT_SAMPLES: usize = 90;
    /// TD - UT in seconds used for the Julian ephemeris date.
    pub const DELTA_T_SECONDS: f64 = 66.0;
}
