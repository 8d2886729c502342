//! Scene renderer.
//!
//! Every call builds a complete frame from scratch: image, optional grid,
//! boxes with labels, hover handles, then the drawing preview. Nothing is
//! cached between frames, so a frame can never show leftovers from an earlier
//! interaction.

use heliobox_raster::{Color, DrawCommand, RasterImage, Rect, Surface, TextRasterizer};

use crate::config::CanvasConfig;
use crate::constants::style::LABEL_GAP;
use crate::model::{AnnotationBox, BoundingRect, ClassTable, Corner, GridOverlay};

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub image: &'a RasterImage,
    pub boxes: &'a [AnnotationBox],
    pub classes: &'a ClassTable,
    pub grid: Option<&'a GridOverlay>,
    pub grid_visible: bool,
    pub hovered: Option<usize>,
    pub preview: Option<BoundingRect>,
}

/// An ordered, fully self-contained list of draw commands.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

fn to_rect(r: &BoundingRect) -> Rect {
    Rect::new(r.x, r.y, r.width, r.height)
}

/// Turns scenes into frames and frames into pixels.
pub struct SceneRenderer {
    config: CanvasConfig,
    text: Option<TextRasterizer>,
}

impl SceneRenderer {
    /// Renderer that rasterizes labels with the system fonts.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            text: Some(TextRasterizer::new()),
        }
    }

    /// Renderer that emits label commands but skips drawing glyphs.
    pub fn without_text(config: CanvasConfig) -> Self {
        Self { config, text: None }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Build the draw commands for one frame, back to front.
    pub fn build_frame(&self, scene: &Scene<'_>) -> Frame {
        let cfg = &self.config;
        let mut commands = vec![
            DrawCommand::Clear {
                color: Color::TRANSPARENT,
            },
            DrawCommand::Image {
                image: scene.image.clone(),
                x: 0,
                y: 0,
            },
        ];

        if scene.grid_visible {
            if let Some(grid) = scene.grid {
                commands.extend(grid.lines().filter(|l| l.points.len() >= 2).map(|line| {
                    DrawCommand::Polyline {
                        points: line.points.iter().map(|p| (p.x, p.y)).collect(),
                        color: cfg.grid_color,
                        width: cfg.grid_line_width,
                    }
                }));
            }
        }

        for (index, b) in scene.boxes.iter().enumerate() {
            let color = scene
                .classes
                .color_or(&b.class_label, cfg.unknown_class_color);
            let width = if scene.hovered == Some(index) {
                cfg.hover_stroke_width
            } else {
                cfg.stroke_width
            };
            commands.push(DrawCommand::StrokeRect {
                rect: to_rect(&b.rect),
                color,
                width,
                dash: None,
            });
            commands.push(DrawCommand::Text {
                text: b.label_text(),
                x: b.rect.x,
                y: (b.rect.y - LABEL_GAP - cfg.label_font_size).max(0.0),
                size: cfg.label_font_size,
                color,
            });
        }

        if let Some(hovered) = scene.hovered.and_then(|i| scene.boxes.get(i)) {
            for corner in Corner::ALL {
                let p = hovered.rect.corner(corner);
                commands.push(DrawCommand::FillRect {
                    rect: Rect::centered(p.x, p.y, cfg.handle_size),
                    color: cfg.handle_color,
                });
            }
        }

        if let Some(preview) = scene.preview {
            commands.push(DrawCommand::StrokeRect {
                rect: to_rect(&preview),
                color: cfg.preview_color,
                width: cfg.stroke_width,
                dash: Some(cfg.preview_dash),
            });
        }

        log::trace!("Built frame with {} commands", commands.len());
        Frame {
            width: scene.image.width(),
            height: scene.image.height(),
            commands,
        }
    }

    /// Paint a frame onto a fresh surface of the frame's size.
    pub fn rasterize(&mut self, frame: &Frame) -> heliobox_raster::Result<Surface> {
        let mut surface = Surface::new(frame.width, frame.height)?;
        surface.execute(&frame.commands, self.text.as_mut());
        Ok(surface)
    }

    /// Build and rasterize in one step.
    pub fn render(&mut self, scene: &Scene<'_>) -> heliobox_raster::Result<Surface> {
        let frame = self.build_frame(scene);
        self.rasterize(&frame)
    }
}
