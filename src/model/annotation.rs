//! Box geometry and annotation instances.

use serde::{Deserialize, Serialize};

/// A position in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise `self - other`.
    pub fn delta_from(self, other: Point) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }
}

/// One of the four resize handles of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// Corners in hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Corner::NorthWest => "NW",
            Corner::NorthEast => "NE",
            Corner::SouthWest => "SW",
            Corner::SouthEast => "SE",
        }
    }
}

/// Axis-aligned rectangle `(x, y, width, height)` in image pixels.
///
/// Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two opposite corners, in any drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::NorthWest => Point::new(self.x, self.y),
            Corner::NorthEast => Point::new(self.right(), self.y),
            Corner::SouthWest => Point::new(self.x, self.bottom()),
            Corner::SouthEast => Point::new(self.right(), self.bottom()),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether both sides are at least `min`.
    pub fn meets_minimum(&self, min: f32) -> bool {
        self.width >= min && self.height >= min
    }

    /// Whether both sides are strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Same size, top-left moved to `origin`.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Drag `corner` by `(dx, dy)` keeping the opposite corner fixed.
    ///
    /// The result is not validated: a large delta can produce a zero or
    /// negative side, which callers reject against their minimum size.
    pub fn resized(&self, corner: Corner, dx: f32, dy: f32) -> Self {
        match corner {
            Corner::NorthWest => Self::new(self.x + dx, self.y + dy, self.width - dx, self.height - dy),
            Corner::NorthEast => Self::new(self.x, self.y + dy, self.width + dx, self.height - dy),
            Corner::SouthWest => Self::new(self.x + dx, self.y, self.width - dx, self.height + dy),
            Corner::SouthEast => Self::new(self.x, self.y, self.width + dx, self.height + dy),
        }
    }
}

impl From<[f32; 4]> for BoundingRect {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BoundingRect> for [f32; 4] {
    fn from(r: BoundingRect) -> Self {
        [r.x, r.y, r.width, r.height]
    }
}

/// A single annotation: class label, rectangle and optional model confidence.
///
/// The serialized shape matches what the detection service returns:
/// `{"class": "C", "bbox": [x, y, w, h], "confidence": 0.91}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBox {
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(rename = "bbox")]
    pub rect: BoundingRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl AnnotationBox {
    /// A manually drawn box (no confidence).
    pub fn new(class_label: impl Into<String>, rect: BoundingRect) -> Self {
        Self {
            class_label: class_label.into(),
            rect,
            confidence: None,
        }
    }

    /// Attach a model confidence, clamped into `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Drop the model's certainty after a human edit.
    pub fn clear_confidence(&mut self) {
        self.confidence = None;
    }

    /// Confidence as a whole percentage, rounded to nearest.
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence.map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
    }

    /// Text drawn above the box: `"C"` or `"C (87%)"`.
    pub fn label_text(&self) -> String {
        match self.confidence_percent() {
            Some(pct) => format!("{} ({}%)", self.class_label, pct),
            None => self.class_label.clone(),
        }
    }
}

/// Keep boxes whose confidence is at least `threshold`; manual boxes are kept.
pub fn proposals_above(boxes: Vec<AnnotationBox>, threshold: f32) -> Vec<AnnotationBox> {
    boxes
        .into_iter()
        .filter(|b| b.confidence.is_none_or(|c| c >= threshold))
        .collect()
}
