//! Glyph rasterization through `cosmic-text`.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Paint, Pixmap, Transform};

use crate::Color;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Owns the font database and glyph cache used to draw labels.
///
/// Loading system fonts is slow, so create one rasterizer and reuse it for
/// every frame.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRasterizer {
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        log::debug!("Loaded {} font faces", font_system.db().len());
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    fn layout(&mut self, text: &str, size: f32) -> Buffer {
        let metrics = Metrics::new(size, size * LINE_HEIGHT_RATIO);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    pub(crate) fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        origin: (f32, f32),
        size: f32,
        color: Color,
    ) {
        let buffer = self.layout(text, size);
        let mut paint = Paint::default();
        let text_color = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            text_color,
            |x, y, w, h, glyph_color| {
                if glyph_color.a() == 0 {
                    return;
                }
                let Some(rect) = tiny_skia::Rect::from_xywh(
                    origin.0 + x as f32,
                    origin.1 + y as f32,
                    w as f32,
                    h as f32,
                ) else {
                    return;
                };
                paint.set_color_rgba8(
                    glyph_color.r(),
                    glyph_color.g(),
                    glyph_color.b(),
                    glyph_color.a(),
                );
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            },
        );
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
