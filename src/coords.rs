//! Mapping between on-screen pointer positions and image pixels.
//!
//! The canvas surface is always the image's native size; the host may show it
//! scaled. Pointer events arrive in client space and must be mapped back into
//! image space before they reach the state machine.

use crate::model::Point;

/// Where the canvas is displayed, and the size of the image behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    /// Left edge of the displayed canvas in client coordinates
    pub left: f32,
    /// Top edge of the displayed canvas in client coordinates
    pub top: f32,
    /// Displayed width in client pixels
    pub display_width: f32,
    /// Displayed height in client pixels
    pub display_height: f32,
    /// Native image width
    pub image_width: u32,
    /// Native image height
    pub image_height: u32,
}

impl DisplayMapping {
    /// Image shown unscaled at the client origin.
    pub fn identity(image_width: u32, image_height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: image_width as f32,
            display_height: image_height as f32,
            image_width,
            image_height,
        }
    }

    /// Horizontal and vertical image pixels per client pixel.
    ///
    /// A collapsed display (zero size) maps at scale 1 rather than dividing by zero.
    pub fn scale(&self) -> (f32, f32) {
        let sx = if self.display_width > 0.0 {
            self.image_width as f32 / self.display_width
        } else {
            1.0
        };
        let sy = if self.display_height > 0.0 {
            self.image_height as f32 / self.display_height
        } else {
            1.0
        };
        (sx, sy)
    }

    /// Client position -> image pixel position. Points outside the displayed
    /// area map outside the image; they are not clamped.
    pub fn to_image(&self, client_x: f32, client_y: f32) -> Point {
        let (sx, sy) = self.scale();
        Point::new((client_x - self.left) * sx, (client_y - self.top) * sy)
    }

    /// Image pixel position -> client position.
    pub fn to_client(&self, point: Point) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (point.x / sx + self.left, point.y / sy + self.top)
    }

    /// Whether a client position lies over the displayed canvas.
    pub fn contains_client(&self, client_x: f32, client_y: f32) -> bool {
        client_x >= self.left
            && client_x <= self.left + self.display_width
            && client_y >= self.top
            && client_y <= self.top + self.display_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identity_passthrough() {
        let m = DisplayMapping::identity(512, 512);
        assert_eq!(m.to_image(100.0, 200.0), Point::new(100.0, 200.0));
    }

    #[test]
    fn test_downscaled_display() {
        // 2000px image shown at 500px, offset by the page layout.
        let m = DisplayMapping {
            left: 20.0,
            top: 40.0,
            display_width: 500.0,
            display_height: 500.0,
            image_width: 2000,
            image_height: 2000,
        };
        let p = m.to_image(270.0, 140.0);
        assert!(approx_eq(p.x, 1000.0));
        assert!(approx_eq(p.y, 400.0));

        let (cx, cy) = m.to_client(p);
        assert!(approx_eq(cx, 270.0));
        assert!(approx_eq(cy, 140.0));
    }

    #[test]
    fn test_non_uniform_scale() {
        let m = DisplayMapping {
            left: 0.0,
            top: 0.0,
            display_width: 100.0,
            display_height: 50.0,
            image_width: 200,
            image_height: 200,
        };
        assert_eq!(m.scale(), (2.0, 4.0));
    }

    #[test]
    fn test_zero_display_size() {
        let m = DisplayMapping {
            display_width: 0.0,
            display_height: 0.0,
            ..DisplayMapping::identity(64, 64)
        };
        assert_eq!(m.scale(), (1.0, 1.0));
    }

    #[test]
    fn test_contains_client() {
        let m = DisplayMapping::identity(10, 10);
        assert!(m.contains_client(10.0, 0.0));
        assert!(!m.contains_client(10.5, 0.0));
    }
}
