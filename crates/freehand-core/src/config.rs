//! Drawing configuration: initial brush, preset colors, and export filename.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields a working setup.

use crate::error::SketchResult;
use crate::model::{BrushSize, BrushState, Color};
use serde::{Deserialize, Serialize};

/// Filename used for the PNG download.
pub const DEFAULT_EXPORT_FILENAME: &str = "my-drawing.png";

/// Configuration for a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    /// Initial stroke width in CSS pixels. Default: **5**.
    pub brush_size: BrushSize,

    /// Initial stroke color, any CSS color. Default: **`#000000`**.
    pub brush_color: String,

    /// Name offered for the downloaded PNG. Default: **`my-drawing.png`**.
    pub export_filename: String,

    /// Preset swatch colors, in display order. Hosts that render their own
    /// swatches (the DOM bridge reads `data-color`) leave this empty.
    pub presets: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            brush_size: BrushSize::DEFAULT,
            brush_color: "#000000".to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            presets: Vec::new(),
        }
    }
}

impl SketchConfig {
    /// Read a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`crate::SketchError::Config`] on malformed JSON or a zero brush size.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The initial brush. An unparseable color falls back to black.
    pub fn brush(&self) -> BrushState {
        let color = Color::parse(&self.brush_color).unwrap_or_else(|err| {
            log::warn!("config brush color ignored: {err}");
            Color::BLACK
        });
        BrushState::new(self.brush_size, color)
    }

    /// Preset colors that parse; invalid entries are skipped with a warning.
    pub fn preset_colors(&self) -> Vec<Color> {
        self.presets
            .iter()
            .filter_map(|raw| match Color::parse(raw) {
                Ok(c) => Some(c),
                Err(err) => {
                    log::warn!("preset skipped: {err}");
                    None
                }
            })
            .collect()
    }
}
