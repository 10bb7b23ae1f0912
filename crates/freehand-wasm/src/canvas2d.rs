//! Canvas2D surface.
//!
//! Draws strokes straight onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. The backing store is sized in physical pixels
//! and the context carries a `scale(dpr, dpr)` transform, so callers draw in
//! CSS pixels.

use freehand_core::{BrushState, Line, SketchError, SketchResult, Surface, SurfaceLayout};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layout: SurfaceLayout,
}

impl CanvasSurface {
    /// Wrap `canvas` and acquire its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Missing canvas 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            layout: SurfaceLayout::EMPTY,
        })
    }

    fn apply_brush(&self, brush: &BrushState) {
        self.ctx.set_stroke_style_str(&brush.color.to_hex());
        self.ctx.set_line_width(f64::from(brush.size.get()));
    }
}

impl Surface for CanvasSurface {
    fn configure(&mut self, layout: SurfaceLayout, brush: &BrushState) {
        let (width, height) = layout.backing_size();
        self.layout = layout;

        // Assigning the size resets the context state and the pixels.
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let dpr = layout.device_pixel_ratio;
        if let Err(err) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("setTransform failed: {err:?}");
        }
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.apply_brush(brush);
        self.ctx
            .clear_rect(0.0, 0.0, layout.css_width, layout.css_height);
    }

    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn stroke_segment(&mut self, segment: Line, brush: &BrushState) {
        if self.layout.is_degenerate() {
            return;
        }
        self.apply_brush(brush);
        self.ctx.begin_path();
        self.ctx.move_to(segment.p0.x, segment.p0.y);
        self.ctx.line_to(segment.p1.x, segment.p1.y);
        self.ctx.stroke();
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.layout.css_width, self.layout.css_height);
    }

    fn png_data_url(&self) -> SketchResult<String> {
        if self.layout.is_degenerate() {
            return Err(SketchError::EmptySurface {
                width: self.canvas.width(),
                height: self.canvas.height(),
            });
        }
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|err| SketchError::Export(format!("{err:?}")))
    }
}
