//! PNG export: encoding, data URLs, and the download payload.

use crate::error::{SketchError, SketchResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// CSS reference density: one CSS pixel is 1/96 inch.
const CSS_PPI: f64 = 96.0;

/// A finished export, ready to hand to a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    pub filename: String,
    pub data_url: String,
}

impl PngExport {
    /// Decode the payload back to PNG bytes.
    ///
    /// # Errors
    /// Fails if `data_url` is not a base64 PNG data URL.
    pub fn png_bytes(&self) -> SketchResult<Vec<u8>> {
        let payload = self
            .data_url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or_else(|| SketchError::Export("not a PNG data URL".to_string()))?;
        STANDARD
            .decode(payload)
            .map_err(|e| SketchError::Export(e.to_string()))
    }
}

/// Encode straight-alpha RGBA8 pixels as PNG.
///
/// `device_pixel_ratio` is written as pixel density metadata so viewers can
/// show the image at its CSS size.
///
/// # Errors
/// Returns [`SketchError::EmptySurface`] for zero dimensions and
/// [`SketchError::Png`] when encoding fails.
pub fn encode_png(
    width: u32,
    height: u32,
    rgba: &[u8],
    device_pixel_ratio: f64,
) -> SketchResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(SketchError::EmptySurface { width, height });
    }

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        // Pixels per meter
        let ppi = CSS_PPI * device_pixel_ratio.max(0.0);
        let ppm = (ppi / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
    }
    log::debug!("encoded {width}x{height} PNG ({} bytes)", buf.len());
    Ok(buf)
}

/// Wrap PNG bytes in a `data:` URL.
pub fn png_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}
