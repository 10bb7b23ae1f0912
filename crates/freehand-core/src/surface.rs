//! Drawing surface abstraction.
//!
//! A surface is a backing pixel buffer sized to the CSS layout box times the
//! device pixel ratio, with a scale transform so callers always draw in CSS
//! pixels. The renderer talks to surfaces only through [`Surface`]; the
//! browser canvas and the software raster both implement it.

use crate::error::SketchResult;
use crate::model::BrushState;
use kurbo::Line;

/// Largest backing dimension accepted by common canvas implementations.
pub const MAX_DIMENSION: u32 = 32767;

/// Largest backing area in pixels (16384 × 16384).
pub const MAX_PIXELS: u64 = 1 << 28;

/// Layout box of the drawing area plus the display's pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Width in CSS pixels.
    pub css_width: f64,
    /// Height in CSS pixels.
    pub css_height: f64,
    /// Physical pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl SurfaceLayout {
    pub const EMPTY: Self = Self {
        css_width: 0.0,
        css_height: 0.0,
        device_pixel_ratio: 1.0,
    };

    /// Build a layout, normalizing the inputs: a missing or nonsensical
    /// pixel ratio becomes 1, negative or non-finite sizes become 0.
    ///
    /// The ratio is lowered when needed so the backing buffer stays within
    /// [`MAX_DIMENSION`] per side and [`MAX_PIXELS`] in total.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let css_width = non_negative(css_width);
        let css_height = non_negative(css_height);
        Self {
            css_width,
            css_height,
            device_pixel_ratio: fit_ratio(css_width, css_height, dpr),
        }
    }

    /// Backing buffer size in physical pixels.
    ///
    /// Each axis is `floor(css × dpr)`, matching how a canvas truncates a
    /// fractional `width`/`height` assignment, clamped to [`MAX_DIMENSION`].
    pub fn backing_size(&self) -> (u32, u32) {
        (
            backing_dim(self.css_width, self.device_pixel_ratio),
            backing_dim(self.css_height, self.device_pixel_ratio),
        )
    }

    /// True when there is nothing to draw into.
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = self.backing_size();
        w == 0 || h == 0
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn fit_ratio(css_width: f64, css_height: f64, dpr: f64) -> f64 {
    let max_side = f64::from(MAX_DIMENSION);
    let longest = css_width.max(css_height);
    let mut dpr = dpr;
    if longest * dpr > max_side {
        dpr = max_side / longest;
    }
    let area = css_width * css_height;
    if area * dpr * dpr > MAX_PIXELS as f64 {
        dpr = (MAX_PIXELS as f64 / area).sqrt();
    }
    dpr
}

fn backing_dim(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).floor();
    if px >= f64::from(MAX_DIMENSION) {
        MAX_DIMENSION
    } else if px > 0.0 {
        px as u32
    } else {
        0
    }
}

/// A pixel surface strokes are rendered onto.
///
/// All coordinates are CSS pixels relative to the surface's top-left corner.
pub trait Surface {
    /// Resize the backing buffer to `layout`, reapply the pixel-ratio scale
    /// and round line caps/joins with `brush`, and clear to transparent.
    /// Existing pixel content is lost.
    fn configure(&mut self, layout: SurfaceLayout, brush: &BrushState);

    /// The layout last passed to [`Surface::configure`].
    fn layout(&self) -> SurfaceLayout;

    /// Draw one straight segment with the brush's width and color, round caps
    /// and joins. A no-op on a degenerate surface.
    fn stroke_segment(&mut self, segment: Line, brush: &BrushState);

    /// Erase every pixel to transparent.
    fn clear(&mut self);

    /// Encode the current pixels as a `data:image/png;base64,...` URL.
    ///
    /// # Errors
    /// Fails on an empty surface or when encoding fails.
    fn png_data_url(&self) -> SketchResult<String>;
}
