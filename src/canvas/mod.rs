//! The annotation canvas component.
//!
//! [`AnnotationCanvas`] ties the caller-owned inputs (image, boxes, class
//! table, grid) to the interaction state machine and the renderer. Every
//! mutation of the box list that ends a gesture is handed back to the caller
//! through the change callback; intermediate drag ticks are not.

#[cfg(test)]
mod tests;

use heliobox_raster::{RasterImage, Surface};

use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::interaction::{CursorStyle, Gesture, Interaction, PointerOutcome};
use crate::model::{AnnotationBox, ClassTable, GridOverlay, Point};
use crate::render::{Frame, Scene, SceneRenderer};

/// Receives the full box list after every add, move, resize or delete.
pub type ChangeCallback = Box<dyn FnMut(&[AnnotationBox])>;

pub struct AnnotationCanvas {
    boxes: Vec<AnnotationBox>,
    classes: ClassTable,
    selected_class: Option<String>,
    grid: Option<GridOverlay>,
    grid_visible: bool,
    image: Option<RasterImage>,
    interaction: Interaction,
    renderer: SceneRenderer,
    on_change: Option<ChangeCallback>,
}

impl AnnotationCanvas {
    /// Canvas that rasterizes labels with the system fonts.
    pub fn new(config: CanvasConfig, classes: ClassTable) -> Self {
        Self::with_renderer(SceneRenderer::new(config), classes)
    }

    /// Canvas drawing through a caller-built renderer; its config is used
    /// for the interaction thresholds too.
    pub fn with_renderer(renderer: SceneRenderer, classes: ClassTable) -> Self {
        Self {
            boxes: Vec::new(),
            classes,
            selected_class: None,
            grid: None,
            grid_visible: true,
            image: None,
            interaction: Interaction::from_config(renderer.config()),
            renderer,
            on_change: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        self.renderer.config()
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&[AnnotationBox]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// The image finished loading. The surface takes its native size.
    pub fn set_image(&mut self, image: RasterImage) {
        log::info!("Canvas image set: {}x{}", image.width(), image.height());
        self.image = Some(image);
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|i| (i.width(), i.height()))
    }

    pub fn boxes(&self) -> &[AnnotationBox] {
        &self.boxes
    }

    /// Replace the box list from the caller's side.
    ///
    /// Degenerate or unlabelled boxes are dropped, confidences are clamped and
    /// any active gesture is abandoned. The callback is not invoked.
    pub fn set_boxes(&mut self, next: Vec<AnnotationBox>) {
        let supplied = next.len();
        self.boxes = next
            .into_iter()
            .filter_map(|mut b| {
                if b.class_label.is_empty() || !b.rect.is_valid() {
                    log::warn!("Dropping invalid box {:?}", b);
                    return None;
                }
                b.confidence = b
                    .confidence
                    .filter(|c| c.is_finite())
                    .map(|c| c.clamp(0.0, 1.0));
                Some(b)
            })
            .collect();
        self.interaction.reset();
        log::debug!("Box list replaced: kept {} of {}", self.boxes.len(), supplied);
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    /// Swap the class table. A selection missing from the new table is cleared.
    pub fn set_classes(&mut self, classes: ClassTable) {
        self.classes = classes;
        if let Some(selected) = &self.selected_class {
            if !self.classes.contains(selected) {
                log::debug!("Selected class '{}' no longer exists", selected);
                self.selected_class = None;
            }
        }
    }

    /// Choose the class for newly drawn boxes, or clear the choice.
    pub fn select_class(&mut self, name: Option<&str>) -> Result<(), CanvasError> {
        match name {
            Some(name) if !self.classes.contains(name) => {
                Err(CanvasError::UnknownClass(name.to_string()))
            }
            _ => {
                self.selected_class = name.map(str::to_string);
                Ok(())
            }
        }
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn set_grid(&mut self, grid: Option<GridOverlay>) {
        self.grid = grid;
    }

    pub fn grid(&self) -> Option<&GridOverlay> {
        self.grid.as_ref()
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn gesture(&self) -> &Gesture {
        self.interaction.gesture()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.interaction.hovered()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.interaction.cursor()
    }

    pub fn pointer_down(&mut self, point: Point) -> Result<PointerOutcome, CanvasError> {
        self.interaction
            .pointer_down(&mut self.boxes, point, self.selected_class.as_deref())
    }

    pub fn pointer_move(&mut self, point: Point) -> PointerOutcome {
        self.interaction.pointer_move(&mut self.boxes, point)
    }

    pub fn pointer_up(&mut self, point: Point) -> PointerOutcome {
        let outcome = self.interaction.pointer_up(&mut self.boxes, point);
        self.publish_if(outcome);
        outcome
    }

    pub fn pointer_leave(&mut self) -> PointerOutcome {
        let outcome = self.interaction.pointer_leave(&mut self.boxes);
        self.publish_if(outcome);
        outcome
    }

    /// Delete the box at `index`. Refused while a gesture is active.
    pub fn remove_box(&mut self, index: usize) -> Option<AnnotationBox> {
        if !self.interaction.is_idle() || index >= self.boxes.len() {
            return None;
        }
        let removed = self.boxes.remove(index);
        log::info!("Removed '{}' box {}", removed.class_label, index);
        self.interaction.reset();
        self.publish();
        Some(removed)
    }

    /// Delete the box under the pointer, if any.
    pub fn remove_hovered(&mut self) -> Option<AnnotationBox> {
        let index = self.interaction.hovered()?;
        self.remove_box(index)
    }

    /// Draw commands for the current state, or `None` before the image loads.
    pub fn frame(&self) -> Option<Frame> {
        let image = self.image.as_ref()?;
        Some(self.renderer.build_frame(&self.scene(image)))
    }

    /// Rasterize the current state, or `None` before the image loads.
    pub fn render(&mut self) -> heliobox_raster::Result<Option<Surface>> {
        let Some(frame) = self.frame() else {
            return Ok(None);
        };
        self.renderer.rasterize(&frame).map(Some)
    }

    fn scene<'a>(&'a self, image: &'a RasterImage) -> Scene<'a> {
        Scene {
            image,
            boxes: &self.boxes,
            classes: &self.classes,
            grid: self.grid.as_ref(),
            grid_visible: self.grid_visible,
            hovered: self.interaction.hovered(),
            preview: self.interaction.preview_rect(),
        }
    }

    fn publish_if(&mut self, outcome: PointerOutcome) {
        if outcome.should_publish() {
            self.publish();
        }
    }

    fn publish(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.boxes);
        }
    }
}
