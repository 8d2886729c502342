//! Browser binding of the annotation canvas.

use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::canvas::AnnotationCanvas;
use crate::config::CanvasConfig;
use crate::coords::DisplayMapping;
use crate::error::CanvasError;
use crate::model::{AnnotationBox, ClassTable, GridOverlay};
use heliobox_raster::RasterImage;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::log_1(&"heliobox: logger already initialized".into());
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Canvas handle exposed to JavaScript. Pointer positions are client
/// coordinates; they are mapped to image pixels through the display set with
/// `set_display`.
#[wasm_bindgen]
pub struct WasmCanvas {
    canvas: AnnotationCanvas,
    mapping: DisplayMapping,
}

#[wasm_bindgen]
impl WasmCanvas {
    /// Create a canvas with the sunspot classes and an optional JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmCanvas, JsValue> {
        let config = match config_json {
            Some(json) => CanvasConfig::from_json(&json).map_err(js_error)?,
            None => CanvasConfig::default(),
        };
        log::info!("heliobox canvas created");
        Ok(WasmCanvas {
            canvas: AnnotationCanvas::new(config, ClassTable::sunspot_default()),
            mapping: DisplayMapping::identity(0, 0),
        })
    }

    /// Image finished loading: straight-alpha RGBA pixels.
    pub fn set_image_rgba(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        let image = RasterImage::from_rgba8(width, height, pixels).map_err(js_error)?;
        self.canvas.set_image(image);
        self.mapping = DisplayMapping::identity(width, height);
        Ok(())
    }

    /// Where the canvas element is shown, from `getBoundingClientRect()`.
    pub fn set_display(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.mapping = DisplayMapping {
            left,
            top,
            display_width: width,
            display_height: height,
            ..self.mapping
        };
    }

    /// Returns whether a redraw is needed. Throws `"class required"` when a
    /// draw starts with no class selected.
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) -> Result<bool, JsValue> {
        let point = self.mapping.to_image(client_x, client_y);
        match self.canvas.pointer_down(point) {
            Ok(outcome) => Ok(outcome.needs_redraw()),
            Err(CanvasError::NoClassSelected) => Err(JsValue::from_str("class required")),
            Err(e) => Err(js_error(e)),
        }
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) -> bool {
        let point = self.mapping.to_image(client_x, client_y);
        self.canvas.pointer_move(point).needs_redraw()
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) -> bool {
        let point = self.mapping.to_image(client_x, client_y);
        self.canvas.pointer_up(point).needs_redraw()
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.canvas.pointer_leave().needs_redraw()
    }

    /// Replace the boxes from a JSON array of `{class, bbox, confidence}`.
    pub fn set_boxes_json(&mut self, json: &str) -> Result<(), JsValue> {
        let boxes: Vec<AnnotationBox> = serde_json::from_str(json).map_err(js_error)?;
        self.canvas.set_boxes(boxes);
        Ok(())
    }

    pub fn boxes_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.canvas.boxes()).map_err(js_error)
    }

    /// Called with the boxes JSON after every add, move, resize or delete.
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.canvas.set_on_change(move |boxes| {
            let json = match serde_json::to_string(boxes) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Failed to serialize boxes: {}", e);
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::error!("Change callback threw: {:?}", e);
            }
        });
    }

    pub fn select_class(&mut self, name: Option<String>) -> Result<(), JsValue> {
        self.canvas.select_class(name.as_deref()).map_err(js_error)
    }

    pub fn set_grid_json(&mut self, json: Option<String>) -> Result<(), JsValue> {
        let grid = match json {
            Some(json) => Some(serde_json::from_str::<GridOverlay>(&json).map_err(js_error)?),
            None => None,
        };
        self.canvas.set_grid(grid);
        Ok(())
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.canvas.set_grid_visible(visible);
    }

    pub fn remove_hovered(&mut self) -> bool {
        self.canvas.remove_hovered().is_some()
    }

    /// CSS cursor for the canvas element.
    pub fn cursor(&self) -> String {
        self.canvas.cursor().css_name().to_string()
    }

    /// Redraw the full frame into `ctx`, sizing its canvas to the image.
    pub fn draw(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let Some(surface) = self.canvas.render().map_err(js_error)? else {
            return Ok(());
        };
        let (width, height) = (surface.width(), surface.height());
        if let Some(element) = ctx.canvas() {
            if element.width() != width || element.height() != height {
                element.set_width(width);
                element.set_height(height);
            }
        }
        let pixels = surface.to_rgba8();
        let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&pixels), width, height)?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }
}
