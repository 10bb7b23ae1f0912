//! Software raster surface backed by a tiny-skia pixmap.
//!
//! Reproduces the Canvas2D behavior the stroke renderer relies on:
//! a `scale(dpr, dpr)` transform, anti-aliased strokes with round caps and
//! joins, transparent clears, and PNG export with straight alpha. Used for
//! native hosts and for testing the renderer without a browser.

use crate::error::{SketchError, SketchResult};
use crate::export::{encode_png, png_data_url};
use crate::model::BrushState;
use crate::surface::{Surface, SurfaceLayout};
use kurbo::Line;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// In-memory RGBA surface.
///
/// Holds no pixmap while the layout is degenerate; every draw is then a no-op.
#[derive(Debug, Clone, Default)]
pub struct RasterSurface {
    layout: SurfaceLayout,
    pixmap: Option<Pixmap>,
}

impl RasterSurface {
    /// An unconfigured (empty) surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface already configured for `layout`.
    pub fn with_layout(layout: SurfaceLayout) -> Self {
        let mut surface = Self::new();
        surface.configure(layout, &BrushState::default());
        surface
    }

    /// Backing buffer size in physical pixels; `(0, 0)` when empty.
    pub fn size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |p| (p.width(), p.height()))
    }

    /// Straight-alpha RGBA of the physical pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap
            .as_ref()
            .is_none_or(|p| p.pixels().iter().all(|px| px.alpha() == 0))
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let Some(pixmap) = self.pixmap.as_ref() else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode the surface as PNG bytes.
    ///
    /// # Errors
    /// [`SketchError::EmptySurface`] when there is no backing buffer.
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        let (width, height) = self.size();
        if self.pixmap.is_none() {
            return Err(SketchError::EmptySurface { width, height });
        }
        encode_png(width, height, &self.to_rgba8(), self.layout.device_pixel_ratio)
    }

    fn transform(&self) -> Transform {
        let dpr = self.layout.device_pixel_ratio as f32;
        Transform::from_scale(dpr, dpr)
    }
}

impl Surface for RasterSurface {
    fn configure(&mut self, layout: SurfaceLayout, _brush: &BrushState) {
        let (width, height) = layout.backing_size();
        self.layout = layout;
        // A fresh pixmap starts fully transparent.
        self.pixmap = Pixmap::new(width, height);
        if self.pixmap.is_none() {
            log::warn!("raster surface is degenerate ({width}x{height}); drawing disabled");
        }
    }

    fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    fn stroke_segment(&mut self, segment: Line, brush: &BrushState) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(segment.p0.x as f32, segment.p0.y as f32);
        pb.line_to(segment.p1.x as f32, segment.p1.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let [r, g, b, a] = brush.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: brush.size.as_f32(),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn png_data_url(&self) -> SketchResult<String> {
        Ok(png_data_url(&self.encode_png()?))
    }
}
