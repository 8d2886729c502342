//! Decorative coordinate-grid overlay.

use serde::{Deserialize, Serialize};

use super::Point;

/// A polyline in image-pixel space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLine {
    pub points: Vec<Point>,
}

impl GridLine {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Consecutive point pairs joined when the line is stroked.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Latitude and longitude polylines drawn over the image. Never hit-tested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridOverlay {
    #[serde(default)]
    pub latitude_lines: Vec<GridLine>,
    #[serde(default)]
    pub longitude_lines: Vec<GridLine>,
}

impl GridOverlay {
    /// All lines, latitudes first.
    pub fn lines(&self) -> impl Iterator<Item = &GridLine> {
        self.latitude_lines.iter().chain(self.longitude_lines.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.latitude_lines.is_empty() && self.longitude_lines.is_empty()
    }
}
