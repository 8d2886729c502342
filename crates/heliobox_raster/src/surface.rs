//! A CPU drawing surface that executes [`DrawCommand`] lists.

use tiny_skia::{
    Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};

use crate::command::{DrawCommand, Rect};
use crate::error::{RasterError, Result};
use crate::text::TextRasterizer;
use crate::{Color, RasterImage};

/// Fixed-size RGBA drawing target.
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Execute every command in order. Text commands are skipped when no
    /// rasterizer is supplied.
    pub fn execute(&mut self, commands: &[DrawCommand], mut text: Option<&mut TextRasterizer>) {
        for command in commands {
            match command {
                DrawCommand::Clear { color } => self.pixmap.fill(color.to_skia()),
                DrawCommand::Image { image, x, y } => self.blit(image, *x, *y),
                DrawCommand::Polyline {
                    points,
                    color,
                    width,
                } => self.polyline(points, *color, *width),
                DrawCommand::StrokeRect {
                    rect,
                    color,
                    width,
                    dash,
                } => self.stroke_rect(*rect, *color, *width, *dash),
                DrawCommand::FillRect { rect, color } => self.fill_rect(*rect, *color),
                DrawCommand::Text {
                    text: label,
                    x,
                    y,
                    size,
                    color,
                } => {
                    if let Some(rasterizer) = text.as_deref_mut() {
                        rasterizer.draw(&mut self.pixmap, label, (*x, *y), *size, *color);
                    }
                }
            }
        }
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }

    fn blit(&mut self, image: &RasterImage, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            image.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn polyline(&mut self, points: &[(f32, f32)], color: Color, width: f32) {
        let mut iter = points.iter();
        let Some(&(x0, y0)) = iter.next() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        for &(x, y) in iter {
            pb.line_to(x, y);
        }

        // A single point or zero-length path yields no geometry.
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &Self::paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32, dash: Option<[f32; 2]>) {
        let Some(skia_rect) = rect.to_skia() else {
            log::trace!("Skipping degenerate stroke rect {:?}", rect);
            return;
        };
        let path = PathBuilder::from_rect(skia_rect);
        let stroke = Stroke {
            width,
            dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(skia_rect) = rect.to_skia() {
            self.pixmap
                .fill_rect(skia_rect, &Self::paint(color), Transform::identity(), None);
        }
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Copy out the frame as straight-alpha RGBA8 rows.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_invalid_size() {
        assert!(Surface::new(0, 10).is_err());
    }

    #[test]
    fn test_clear_then_fill_overwrites() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.execute(
            &[
                DrawCommand::Clear { color: RED },
                DrawCommand::FillRect {
                    rect: Rect::new(5.0, 5.0, 10.0, 10.0),
                    color: BLUE,
                },
            ],
            None,
        );
        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(10, 10), Some(BLUE));
    }

    #[test]
    fn test_image_blit_at_native_resolution() {
        let image = RasterImage::solid(4, 4, BLUE).unwrap();
        let mut surface = Surface::new(8, 8).unwrap();
        surface.execute(&[DrawCommand::Image { image, x: 2, y: 2 }], None);
        assert_eq!(surface.pixel(3, 3), Some(BLUE));
        assert_eq!(surface.pixel(7, 7).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_stroke_rect_leaves_interior_untouched() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.execute(
            &[DrawCommand::StrokeRect {
                rect: Rect::new(10.0, 10.0, 20.0, 20.0),
                color: RED,
                width: 2.0,
                dash: None,
            }],
            None,
        );
        assert_eq!(surface.pixel(10, 20).map(|c| c.r), Some(255));
        assert_eq!(surface.pixel(20, 20).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_dashed_stroke_has_gaps() {
        let mut surface = Surface::new(60, 20).unwrap();
        surface.execute(
            &[DrawCommand::StrokeRect {
                rect: Rect::new(2.0, 5.0, 50.0, 10.0),
                color: RED,
                width: 2.0,
                dash: Some([6.0, 4.0]),
            }],
            None,
        );
        let top_edge: Vec<u8> = (2..52)
            .filter_map(|x| surface.pixel(x, 5).map(|c| c.a))
            .collect();
        assert!(top_edge.iter().any(|&a| a > 200));
        assert!(top_edge.iter().any(|&a| a == 0));
    }

    #[test]
    fn test_polyline_with_single_point_draws_nothing() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.execute(
            &[DrawCommand::Polyline {
                points: vec![(5.0, 5.0)],
                color: RED,
                width: 1.0,
            }],
            None,
        );
        assert!(surface.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_text_skipped_without_rasterizer() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.execute(
            &[DrawCommand::Text {
                text: "A".to_string(),
                x: 0.0,
                y: 0.0,
                size: 8.0,
                color: RED,
            }],
            None,
        );
        assert!(surface.to_rgba8().iter().all(|&b| b == 0));
    }
}
