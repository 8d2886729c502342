//! Pointer interaction state machine.
//!
//! The canvas is always in exactly one [`Gesture`]. Hit-testing only happens
//! while idle; once a gesture starts it owns the pointer until release or
//! leave, which always returns the machine to [`Gesture::Idle`].
//!
//! Precedence on pointer-down: resize handle, then box body, then a new box.

use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::hit_test::{box_at, resize_handle_at};
use crate::model::{AnnotationBox, BoundingRect, Corner, Point};

/// The active gesture and everything it captured at pointer-down.
///
/// Returning to `Idle` drops all captured state, so nothing from a finished
/// gesture can leak into the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing {
        anchor: Point,
        current: Point,
        class_label: String,
    },
    Moving {
        index: usize,
        /// Pointer position minus the box's top-left at pointer-down
        offset: (f32, f32),
        start_rect: BoundingRect,
    },
    Resizing {
        index: usize,
        corner: Corner,
        start_pointer: Point,
        start_rect: BoundingRect,
    },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Drawing { .. } => "drawing",
            Gesture::Moving { .. } => "moving",
            Gesture::Resizing { .. } => "resizing",
        }
    }
}

/// Pointer cursor to show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Crosshair,
    Move,
    /// Diagonal resize for NW and SE handles
    ResizeNwse,
    /// Diagonal resize for NE and SW handles
    ResizeNesw,
}

impl CursorStyle {
    pub fn for_corner(corner: Corner) -> Self {
        match corner {
            Corner::NorthWest | Corner::SouthEast => CursorStyle::ResizeNwse,
            Corner::NorthEast | Corner::SouthWest => CursorStyle::ResizeNesw,
        }
    }

    /// CSS `cursor` value.
    pub fn css_name(&self) -> &'static str {
        match self {
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Move => "move",
            CursorStyle::ResizeNwse => "nwse-resize",
            CursorStyle::ResizeNesw => "nesw-resize",
        }
    }
}

/// What a pointer event did, so the host knows whether to redraw or publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing visible changed.
    Unchanged,
    /// Hover, cursor, preview or in-progress geometry changed.
    Redraw,
    /// A gesture ended; the box list is final and should be published.
    Commit,
    /// A draw gesture ended below the minimum size and added nothing.
    Discarded,
}

impl PointerOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, PointerOutcome::Unchanged)
    }

    pub fn should_publish(&self) -> bool {
        matches!(self, PointerOutcome::Commit)
    }
}

/// Interaction state for one canvas.
#[derive(Debug, Clone)]
pub struct Interaction {
    gesture: Gesture,
    hovered: Option<usize>,
    cursor: CursorStyle,
    last_pointer: Option<Point>,
    min_box_size: f32,
    handle_size: f32,
}

impl Interaction {
    pub fn new(min_box_size: f32, handle_size: f32) -> Self {
        Self {
            gesture: Gesture::Idle,
            hovered: None,
            cursor: CursorStyle::default(),
            last_pointer: None,
            min_box_size,
            handle_size,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.min_box_size, config.handle_size)
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// Box drawn with hover emphasis and handles.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Dashed rectangle to draw while a new box is being dragged out.
    pub fn preview_rect(&self) -> Option<BoundingRect> {
        match &self.gesture {
            Gesture::Drawing { anchor, current, .. } => {
                Some(BoundingRect::from_corners(*anchor, *current))
            }
            _ => None,
        }
    }

    /// Abandon any gesture and forget hover state.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            log::debug!("Abandoning {} gesture", self.gesture.name());
        }
        self.gesture = Gesture::Idle;
        self.hovered = None;
        self.cursor = CursorStyle::default();
    }

    /// Start a gesture. Fails only when a draw would start without a class.
    pub fn pointer_down(
        &mut self,
        boxes: &mut [AnnotationBox],
        point: Point,
        selected_class: Option<&str>,
    ) -> Result<PointerOutcome, CanvasError> {
        if !point.is_finite() {
            log::warn!("Ignoring non-finite pointer down ({}, {})", point.x, point.y);
            return Ok(PointerOutcome::Unchanged);
        }
        self.last_pointer = Some(point);

        if !self.is_idle() {
            log::warn!(
                "Pointer down during {} gesture ignored",
                self.gesture.name()
            );
            return Ok(PointerOutcome::Unchanged);
        }

        if let Some(hit) = resize_handle_at(boxes, point, self.handle_size) {
            let b = &mut boxes[hit.index];
            b.clear_confidence();
            log::debug!(
                "Resizing box {} from {} handle at ({:.1}, {:.1})",
                hit.index,
                hit.corner.short_name(),
                point.x,
                point.y
            );
            self.gesture = Gesture::Resizing {
                index: hit.index,
                corner: hit.corner,
                start_pointer: point,
                start_rect: b.rect,
            };
            self.hovered = Some(hit.index);
            self.cursor = CursorStyle::for_corner(hit.corner);
            return Ok(PointerOutcome::Redraw);
        }

        if let Some(index) = box_at(boxes, point) {
            let b = &mut boxes[index];
            b.clear_confidence();
            log::debug!("Moving box {} from ({:.1}, {:.1})", index, point.x, point.y);
            self.gesture = Gesture::Moving {
                index,
                offset: point.delta_from(b.rect.top_left()),
                start_rect: b.rect,
            };
            self.hovered = Some(index);
            self.cursor = CursorStyle::Move;
            return Ok(PointerOutcome::Redraw);
        }

        let Some(class_label) = selected_class.filter(|c| !c.is_empty()) else {
            log::debug!("Draw rejected at ({:.1}, {:.1}): no class selected", point.x, point.y);
            return Err(CanvasError::NoClassSelected);
        };

        log::debug!(
            "Drawing '{}' box from ({:.1}, {:.1})",
            class_label,
            point.x,
            point.y
        );
        self.gesture = Gesture::Drawing {
            anchor: point,
            current: point,
            class_label: class_label.to_string(),
        };
        self.hovered = None;
        self.cursor = CursorStyle::Crosshair;
        Ok(PointerOutcome::Redraw)
    }

    /// Update hover while idle, or advance the active gesture.
    pub fn pointer_move(&mut self, boxes: &mut [AnnotationBox], point: Point) -> PointerOutcome {
        if !point.is_finite() {
            log::warn!("Ignoring non-finite pointer move ({}, {})", point.x, point.y);
            return PointerOutcome::Unchanged;
        }
        self.last_pointer = Some(point);
        log::trace!(
            "Pointer move ({:.1}, {:.1}) in {}",
            point.x,
            point.y,
            self.gesture.name()
        );

        if let Gesture::Drawing { current, .. } = &mut self.gesture {
            *current = point;
            return PointerOutcome::Redraw;
        }

        if self.is_idle() {
            self.update_hover(boxes, point)
        } else if self.apply_drag(boxes, point) {
            PointerOutcome::Redraw
        } else {
            PointerOutcome::Unchanged
        }
    }

    /// Finish the active gesture at `point`. A non-finite point is ignored and
    /// the gesture stays active.
    pub fn pointer_up(&mut self, boxes: &mut Vec<AnnotationBox>, point: Point) -> PointerOutcome {
        if !point.is_finite() {
            log::warn!("Ignoring non-finite pointer up ({}, {})", point.x, point.y);
            return PointerOutcome::Unchanged;
        }
        self.last_pointer = Some(point);

        let outcome = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return PointerOutcome::Unchanged,
            Gesture::Drawing {
                anchor,
                class_label,
                ..
            } => {
                let rect = BoundingRect::from_corners(anchor, point);
                if rect.meets_minimum(self.min_box_size) {
                    log::info!(
                        "Added '{}' box ({:.1}, {:.1}, {:.1}, {:.1})",
                        class_label,
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height
                    );
                    boxes.push(AnnotationBox::new(class_label, rect));
                    PointerOutcome::Commit
                } else {
                    log::debug!(
                        "Discarded {:.1}x{:.1} box below minimum size {}",
                        rect.width,
                        rect.height,
                        self.min_box_size
                    );
                    PointerOutcome::Discarded
                }
            }
            gesture @ (Gesture::Moving { .. } | Gesture::Resizing { .. }) => {
                // Restore so the final position is applied with the same math as a tick.
                self.gesture = gesture;
                self.apply_drag(boxes, point);
                if let Gesture::Moving { index, .. } | Gesture::Resizing { index, .. } =
                    std::mem::take(&mut self.gesture)
                {
                    if let Some(b) = boxes.get(index) {
                        log::info!(
                            "Committed box {} at ({:.1}, {:.1}, {:.1}, {:.1})",
                            index,
                            b.rect.x,
                            b.rect.y,
                            b.rect.width,
                            b.rect.height
                        );
                    }
                }
                PointerOutcome::Commit
            }
        };

        self.update_hover(boxes, point);
        outcome
    }

    /// The pointer left the canvas: finish any gesture at the last known
    /// position, or drop the hover state when idle.
    pub fn pointer_leave(&mut self, boxes: &mut Vec<AnnotationBox>) -> PointerOutcome {
        if self.is_idle() {
            let changed = self.hovered.is_some() || self.cursor != CursorStyle::default();
            self.hovered = None;
            self.cursor = CursorStyle::default();
            return if changed {
                PointerOutcome::Redraw
            } else {
                PointerOutcome::Unchanged
            };
        }

        let point = match (&self.gesture, self.last_pointer) {
            (Gesture::Drawing { current, .. }, _) => *current,
            (_, Some(last)) => last,
            (_, None) => Point::default(),
        };
        log::debug!("Pointer left canvas during {}; finishing gesture", self.gesture.name());
        let outcome = self.pointer_up(boxes, point);
        self.hovered = None;
        self.cursor = CursorStyle::default();
        outcome
    }

    /// Apply the current move/resize gesture for a pointer at `point`.
    /// Returns whether the box geometry changed.
    fn apply_drag(&mut self, boxes: &mut [AnnotationBox], point: Point) -> bool {
        let min = self.min_box_size;
        let (index, candidate) = match &self.gesture {
            Gesture::Moving {
                index,
                offset,
                start_rect,
            } => (
                *index,
                Some(start_rect.with_origin(Point::new(point.x - offset.0, point.y - offset.1))),
            ),
            Gesture::Resizing {
                index,
                corner,
                start_pointer,
                start_rect,
            } => {
                let (dx, dy) = point.delta_from(*start_pointer);
                let rect = start_rect.resized(*corner, dx, dy);
                // Below the minimum the previous frame's geometry stays.
                (*index, rect.meets_minimum(min).then_some(rect))
            }
            _ => return false,
        };

        let Some(b) = boxes.get_mut(index) else {
            log::warn!("Box {} vanished during {} gesture", index, self.gesture.name());
            self.gesture = Gesture::Idle;
            return false;
        };

        b.clear_confidence();
        match candidate {
            Some(rect) if rect != b.rect => {
                b.rect = rect;
                true
            }
            _ => false,
        }
    }

    fn update_hover(&mut self, boxes: &[AnnotationBox], point: Point) -> PointerOutcome {
        let (hovered, cursor) = if let Some(hit) = resize_handle_at(boxes, point, self.handle_size) {
            (Some(hit.index), CursorStyle::for_corner(hit.corner))
        } else if let Some(index) = box_at(boxes, point) {
            (Some(index), CursorStyle::Move)
        } else {
            (None, CursorStyle::Crosshair)
        };

        if hovered == self.hovered && cursor == self.cursor {
            return PointerOutcome::Unchanged;
        }
        self.hovered = hovered;
        self.cursor = cursor;
        PointerOutcome::Redraw
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}
