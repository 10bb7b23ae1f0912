//! WASM bridge for freehand. Exposes the stroke renderer to the page.
//!
//! Compiled via `wasm-pack build --target web`. Either call [`mount`] to wire
//! the standard drawing page, or drive a [`FreehandCanvas`] from JS.

mod canvas2d;
mod console;
mod dom;

pub use canvas2d::CanvasSurface;
pub use dom::{DomBindings, MountConfig, mount};

use freehand_core::{SketchConfig, SketchError, SurfaceLayout};
use freehand_editor::{InputEvent, Palette, StrokeRenderer};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The main WASM-facing canvas controller.
///
/// One instance per `<canvas>`. All interaction from JS goes through this
/// struct.
#[wasm_bindgen]
pub struct FreehandCanvas {
    renderer: StrokeRenderer<CanvasSurface>,
}

#[wasm_bindgen]
impl FreehandCanvas {
    /// Wrap `canvas`. `config_json` is an optional [`SketchConfig`] object.
    /// The surface is empty until the first `resize`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<FreehandCanvas, JsValue> {
        console::console_error_panic_hook_setup();
        console::ensure_logging();

        let config = match config_json.as_deref() {
            Some(json) => SketchConfig::from_json(json).map_err(to_js)?,
            None => SketchConfig::default(),
        };
        let surface = CanvasSurface::new(canvas)?;
        Ok(Self {
            renderer: StrokeRenderer::new(surface, &config),
        })
    }

    /// Resize the backing store to the layout box times `device_pixel_ratio`
    /// and clear it.
    pub fn resize(&mut self, css_width: f64, css_height: f64, device_pixel_ratio: f64) {
        self.renderer
            .resize(SurfaceLayout::new(css_width, css_height, device_pixel_ratio));
    }

    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.renderer.begin_stroke(x, y);
    }

    /// Returns `true` if a segment was drawn.
    pub fn extend_stroke(&mut self, x: f64, y: f64) -> bool {
        self.renderer.extend_stroke(x, y)
    }

    pub fn end_stroke(&mut self) {
        self.renderer.end_stroke();
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    pub fn clear(&mut self) {
        self.renderer.clear();
    }

    /// PNG data URL of the current pixels.
    pub fn export_png(&self) -> Result<String, JsValue> {
        self.renderer
            .export_png()
            .map(|export| export.data_url)
            .map_err(to_js)
    }

    /// Export and download as the configured filename.
    /// Returns `false` if there was nothing to export.
    pub fn save(&self) -> bool {
        let export = match self.renderer.export_png() {
            Ok(export) => export,
            Err(err) => {
                log::warn!("save skipped: {err}");
                return false;
            }
        };
        match dom::trigger_download(&export) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("download failed: {err:?}");
                false
            }
        }
    }

    /// Set the brush size from a control value. Returns the effective size.
    pub fn set_brush_size(&mut self, raw: &str) -> u32 {
        self.renderer.set_brush_size(raw).get()
    }

    /// Set a custom brush color, clearing the preset markers.
    /// Returns `false` (brush unchanged) if `raw` is not a color.
    pub fn set_brush_color(&mut self, raw: &str) -> bool {
        match self.renderer.set_brush_color(raw) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Replace the preset swatches from a JSON array of CSS colors.
    /// Unparseable entries are skipped. Returns `false` on malformed JSON.
    pub fn set_presets(&mut self, json: &str) -> bool {
        let raw: Vec<String> = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("presets ignored: {err}");
                return false;
            }
        };
        let config = SketchConfig {
            presets: raw,
            ..SketchConfig::default()
        };
        self.renderer
            .set_palette(Palette::new(config.preset_colors(), None));
        true
    }

    /// Switch to preset `index`. Returns its hex color, or empty string if
    /// out of range.
    pub fn select_preset(&mut self, index: usize) -> String {
        self.renderer
            .select_preset(index)
            .map(|c| c.to_hex())
            .unwrap_or_default()
    }

    /// Index of the active preset, or -1.
    pub fn active_preset(&self) -> i32 {
        self.renderer
            .palette()
            .active()
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Current brush as JSON: `{"color":"#RRGGBB","size":n}`.
    pub fn brush_json(&self) -> String {
        self.renderer.brush().to_json()
    }
}

// ─── Crate-internal API ──────────────────────────────────────────────────

impl FreehandCanvas {
    pub(crate) fn from_renderer(renderer: StrokeRenderer<CanvasSurface>) -> Self {
        Self { renderer }
    }

    pub(crate) fn renderer(&self) -> &StrokeRenderer<CanvasSurface> {
        &self.renderer
    }

    pub(crate) fn renderer_mut(&mut self) -> &mut StrokeRenderer<CanvasSurface> {
        &mut self.renderer
    }

    /// Apply a normalized input event. Returns `true` if pixels changed.
    pub(crate) fn handle(&mut self, event: &InputEvent) -> bool {
        self.renderer.handle(event)
    }
}

fn to_js(err: SketchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
