//! Immutable raster images shared between frames.

use std::sync::Arc;

use tiny_skia::{IntSize, Pixmap};

use crate::error::{RasterError, Result};

/// A decoded RGBA image, stored premultiplied and reference counted so every
/// frame can blit it without copying.
#[derive(Clone)]
pub struct RasterImage {
    pixmap: Arc<Pixmap>,
}

impl RasterImage {
    /// Create an image from straight-alpha RGBA8 pixels in row-major order.
    pub fn from_rgba8(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RasterError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        for px in pixels.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a < 255 {
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * a + 127) / 255) as u8;
                }
            }
        }

        let size = IntSize::from_wh(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        let pixmap = Pixmap::from_vec(pixels, size).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap: Arc::new(pixmap),
        })
    }

    /// A single-color image, handy as a placeholder background.
    pub fn solid(width: u32, height: u32, color: crate::Color) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self::from_rgba8(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
