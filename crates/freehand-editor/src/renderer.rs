//! The canvas stroke renderer.
//!
//! Owns one surface, the brush, the preset palette, and the pen session.
//! Every input event runs to completion on the caller's thread; each
//! `extend_stroke` renders exactly one segment immediately.

use crate::input::{InputEvent, StrokeAction};
use crate::palette::Palette;
use crate::session::DrawingSession;
use freehand_core::{
    BrushSize, BrushState, Color, PngExport, SketchConfig, SketchResult, Surface, SurfaceLayout,
};
use kurbo::Point;

pub struct StrokeRenderer<S: Surface> {
    surface: S,
    brush: BrushState,
    palette: Palette,
    session: DrawingSession,
    export_filename: String,
}

impl<S: Surface> StrokeRenderer<S> {
    /// Create a renderer from config. The surface stays as given until the
    /// first [`StrokeRenderer::resize`].
    pub fn new(surface: S, config: &SketchConfig) -> Self {
        Self {
            surface,
            brush: config.brush(),
            palette: Palette::new(config.preset_colors(), None),
            session: DrawingSession::Idle,
            export_filename: config.export_filename.clone(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Layout the surface was last configured with.
    pub fn layout(&self) -> SurfaceLayout {
        self.surface.layout()
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the preset swatches (e.g. with the ones found in the page).
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn session(&self) -> DrawingSession {
        self.session
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    pub fn export_filename(&self) -> &str {
        &self.export_filename
    }

    // ─── Surface lifecycle ──────────────────────────────────────────────

    /// Resize the backing buffer to `layout` and clear it.
    ///
    /// All strokes are lost. An in-progress stroke is ended, so the next
    /// move does not join across the reset.
    pub fn resize(&mut self, layout: SurfaceLayout) {
        self.session.end();
        self.surface.configure(layout, &self.brush);

        let applied = self.surface.layout();
        let (w, h) = applied.backing_size();
        log::debug!(
            "resize: {}x{} css @ {}x -> {w}x{h}",
            applied.css_width,
            applied.css_height,
            applied.device_pixel_ratio
        );
    }

    /// Erase the surface to transparent. Brush and presets are kept.
    pub fn clear(&mut self) {
        log::debug!("clear");
        self.surface.clear();
    }

    /// Serialize the surface as a PNG data URL under the export filename.
    ///
    /// # Errors
    /// Fails on an empty surface or when encoding fails.
    pub fn export_png(&self) -> SketchResult<PngExport> {
        let data_url = self.surface.png_data_url()?;
        log::debug!("export {} ({} bytes)", self.export_filename, data_url.len());
        Ok(PngExport {
            filename: self.export_filename.clone(),
            data_url,
        })
    }

    // ─── Strokes ────────────────────────────────────────────────────────

    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.session.begin(Point::new(x, y));
    }

    /// Draw a segment from the last pen position to `(x, y)`.
    /// Returns `false` (and draws nothing) when no stroke is active.
    pub fn extend_stroke(&mut self, x: f64, y: f64) -> bool {
        let Some(segment) = self.session.advance(Point::new(x, y)) else {
            return false;
        };
        log::trace!(
            "segment ({}, {}) -> ({}, {}) w={} {}",
            segment.p0.x,
            segment.p0.y,
            segment.p1.x,
            segment.p1.y,
            self.brush.size,
            self.brush.color
        );
        self.surface.stroke_segment(segment, &self.brush);
        true
    }

    pub fn end_stroke(&mut self) {
        self.session.end();
    }

    /// Apply one input event. Returns `true` if pixels were drawn.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event.action() {
            StrokeAction::Begin(p) => {
                self.begin_stroke(p.x, p.y);
                false
            }
            StrokeAction::Extend(p) => self.extend_stroke(p.x, p.y),
            StrokeAction::End => {
                self.end_stroke();
                false
            }
            StrokeAction::Ignore => false,
        }
    }

    // ─── Brush ──────────────────────────────────────────────────────────

    /// Set the brush size from a control value; invalid input becomes 1.
    /// Returns the effective size.
    pub fn set_brush_size(&mut self, raw: &str) -> BrushSize {
        let size = BrushSize::parse(raw);
        log::debug!("brush size {raw:?} -> {size}");
        self.brush.size = size;
        size
    }

    /// Set a custom brush color. Clears every preset marker.
    ///
    /// # Errors
    /// [`freehand_core::SketchError::InvalidColor`]; brush and markers are
    /// left unchanged.
    pub fn set_brush_color(&mut self, raw: &str) -> SketchResult<Color> {
        let color = Color::parse(raw)?;
        log::debug!("brush color {color}");
        self.brush.color = color;
        self.palette.clear_active();
        Ok(color)
    }

    /// Switch to preset `index` and mark it active. Returns its color so the
    /// color picker can mirror it; `None` if out of range.
    pub fn select_preset(&mut self, index: usize) -> Option<Color> {
        let color = self.palette.select(index)?;
        log::debug!("preset {index} -> {color}");
        self.brush.color = color;
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use freehand_core::RasterSurface;
    use pretty_assertions::assert_eq;

    fn renderer() -> StrokeRenderer<RasterSurface> {
        let mut r = StrokeRenderer::new(RasterSurface::new(), &SketchConfig::default());
        r.resize(SurfaceLayout::new(100.0, 40.0, 1.0));
        r
    }

    #[test]
    fn extend_before_begin_is_noop() {
        let mut r = renderer();
        assert!(!r.extend_stroke(50.0, 20.0));
        assert!(r.surface().is_blank());
    }

    #[test]
    fn stroke_lifecycle() {
        let mut r = renderer();
        r.begin_stroke(10.0, 10.0);
        assert!(r.is_drawing());
        assert!(r.extend_stroke(30.0, 10.0));
        assert_eq!(r.session().last_point(), Some(Point::new(30.0, 10.0)));
        r.end_stroke();
        r.end_stroke();
        assert!(!r.is_drawing());
        assert!(!r.extend_stroke(60.0, 10.0));
    }

    #[test]
    fn resize_ends_active_stroke() {
        let mut r = renderer();
        r.begin_stroke(1.0, 1.0);
        r.resize(SurfaceLayout::new(50.0, 50.0, 2.0));
        assert!(!r.is_drawing());
        assert_eq!(r.surface().size(), (100, 100));
        assert_eq!(r.layout(), SurfaceLayout::new(50.0, 50.0, 2.0));
    }

    #[test]
    fn handle_maps_events() {
        let mut r = renderer();
        assert!(!r.handle(&InputEvent::from_pointer_down(5.0, 5.0, PointerButton::Secondary)));
        assert!(!r.is_drawing());

        assert!(!r.handle(&InputEvent::from_pointer_down(5.0, 5.0, PointerButton::Primary)));
        assert!(r.handle(&InputEvent::from_pointer_move(25.0, 5.0)));
        assert!(!r.handle(&InputEvent::PointerLeave));
        assert!(!r.handle(&InputEvent::from_pointer_move(45.0, 5.0)));
    }

    #[test]
    fn brush_size_validation() {
        let mut r = renderer();
        assert_eq!(r.set_brush_size("17").get(), 17);
        assert_eq!(r.brush().size.get(), 17);
        assert_eq!(r.set_brush_size("abc").get(), 1);
        assert_eq!(r.brush().size, BrushSize::MIN);
    }

    #[test]
    fn invalid_color_keeps_brush_and_markers() {
        let config = SketchConfig {
            presets: vec!["#ff0000".into(), "#0000ff".into()],
            ..SketchConfig::default()
        };
        let mut r = StrokeRenderer::new(RasterSurface::new(), &config);
        r.select_preset(1);
        assert!(r.set_brush_color("bogus").is_err());
        assert_eq!(r.brush().color.to_hex(), "#0000FF");
        assert_eq!(r.palette().active(), Some(1));
    }

    #[test]
    fn export_uses_configured_filename() {
        let config = SketchConfig {
            export_filename: "sketch.png".into(),
            ..SketchConfig::default()
        };
        let mut r = StrokeRenderer::new(RasterSurface::new(), &config);
        assert!(r.export_png().is_err());
        r.resize(SurfaceLayout::new(8.0, 8.0, 1.0));
        let export = r.export_png().unwrap();
        assert_eq!(export.filename, "sketch.png");
        assert!(export.data_url.starts_with("data:image/png;base64,"));
    }
}
