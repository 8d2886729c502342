//! JSON scene descriptions for the command line front end.
//!
//! A scene names the image to annotate, the class table, the initial boxes,
//! an optional grid overlay and a script of pointer events to replay.

use std::path::{Path, PathBuf};

use heliobox_raster::{RasterImage, Surface};
use serde::{Deserialize, Serialize};

use crate::canvas::AnnotationCanvas;
use crate::error::SceneError;
use crate::interaction::PointerOutcome;
use crate::model::{AnnotationBox, ClassDefinition, ClassTable, GridOverlay, Point};

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Leave,
    /// Change or clear the class used for new boxes
    Select {
        #[serde(default)]
        class: Option<String>,
    },
    Remove { index: usize },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Image path, relative to the scene file unless absolute
    pub image: PathBuf,
    /// Class table; the sunspot classes when omitted
    #[serde(default)]
    pub classes: Option<Vec<ClassDefinition>>,
    #[serde(default)]
    pub boxes: Vec<AnnotationBox>,
    #[serde(default)]
    pub selected_class: Option<String>,
    #[serde(default)]
    pub grid: Option<GridOverlay>,
    #[serde(default = "default_true")]
    pub grid_visible: bool,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

/// What happened while replaying a scene's events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Gestures that changed the box list
    pub commits: usize,
    /// Draws that ended below the minimum size
    pub discarded: usize,
    /// Events refused by the canvas
    pub rejected: usize,
}

impl ReplayReport {
    fn record(&mut self, outcome: PointerOutcome) {
        match outcome {
            PointerOutcome::Commit => self.commits += 1,
            PointerOutcome::Discarded => self.discarded += 1,
            PointerOutcome::Unchanged | PointerOutcome::Redraw => {}
        }
    }
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        log::info!(
            "Loaded scene {:?}: {} boxes, {} events",
            path,
            scene.boxes.len(),
            scene.events.len()
        );
        Ok(scene)
    }

    /// Resolve the image path against the directory of `scene_path`.
    pub fn image_path(&self, scene_path: &Path) -> PathBuf {
        if self.image.is_absolute() {
            return self.image.clone();
        }
        scene_path
            .parent()
            .map(|dir| dir.join(&self.image))
            .unwrap_or_else(|| self.image.clone())
    }

    pub fn class_table(&self) -> ClassTable {
        match &self.classes {
            Some(classes) => ClassTable::new(classes.iter().cloned()),
            None => ClassTable::sunspot_default(),
        }
    }

    /// Apply the scene's classes, boxes, selection and grid to `canvas`.
    pub fn apply_to(&self, canvas: &mut AnnotationCanvas) -> Result<(), SceneError> {
        canvas.set_classes(self.class_table());
        canvas.set_boxes(self.boxes.clone());
        canvas.select_class(self.selected_class.as_deref())?;
        canvas.set_grid(self.grid.clone());
        canvas.set_grid_visible(self.grid_visible);
        Ok(())
    }

    /// Feed the scripted events to `canvas`. Refused events are logged and
    /// counted; they never abort the replay.
    pub fn replay(&self, canvas: &mut AnnotationCanvas) -> ReplayReport {
        let mut report = ReplayReport::default();

        for (step, event) in self.events.iter().enumerate() {
            match event {
                SceneEvent::Down { x, y } => match canvas.pointer_down(Point::new(*x, *y)) {
                    Ok(outcome) => report.record(outcome),
                    Err(e) => {
                        log::warn!("Event {}: {}", step, e);
                        report.rejected += 1;
                    }
                },
                SceneEvent::Move { x, y } => report.record(canvas.pointer_move(Point::new(*x, *y))),
                SceneEvent::Up { x, y } => report.record(canvas.pointer_up(Point::new(*x, *y))),
                SceneEvent::Leave => report.record(canvas.pointer_leave()),
                SceneEvent::Select { class } => {
                    if let Err(e) = canvas.select_class(class.as_deref()) {
                        log::warn!("Event {}: {}", step, e);
                        report.rejected += 1;
                    }
                }
                SceneEvent::Remove { index } => {
                    if canvas.remove_box(*index).is_some() {
                        report.commits += 1;
                    } else {
                        log::warn!("Event {}: box {} cannot be removed", step, index);
                        report.rejected += 1;
                    }
                }
            }
        }

        log::info!(
            "Replayed {} events: {} commits, {} discarded, {} rejected",
            self.events.len(),
            report.commits,
            report.discarded,
            report.rejected
        );
        report
    }
}

/// Decode an image file into a raster image.
pub fn load_image(path: &Path) -> Result<RasterImage, SceneError> {
    let decoded = image::open(path).map_err(|source| SceneError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {:?}: {}x{}", path, width, height);
    Ok(RasterImage::from_rgba8(width, height, rgba.into_raw())?)
}

/// Encode a rendered surface as PNG.
pub fn save_png(surface: &Surface, path: &Path) -> Result<(), SceneError> {
    let (width, height) = (surface.width(), surface.height());
    let buffer = image::RgbaImage::from_raw(width, height, surface.to_rgba8())
        .ok_or_else(|| SceneError::Invalid(format!("surface buffer does not match {}x{}", width, height)))?;
    buffer.save(path).map_err(|source| SceneError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {}x{} frame to {:?}", width, height, path);
    Ok(())
}
