//! Preset color swatches and the "active" marker.
//!
//! At most one preset is active. Picking a preset marks it; entering a custom
//! color clears every marker.

use freehand_core::Color;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    presets: Vec<Color>,
    active: Option<usize>,
}

impl Palette {
    /// `active` is dropped if out of range.
    pub fn new(presets: Vec<Color>, active: Option<usize>) -> Self {
        let active = active.filter(|&i| i < presets.len());
        Self { presets, active }
    }

    pub fn presets(&self) -> &[Color] {
        &self.presets
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Mark preset `index` active and return its color.
    /// Out of range leaves the markers alone and returns `None`.
    pub fn select(&mut self, index: usize) -> Option<Color> {
        let color = *self.presets.get(index)?;
        self.active = Some(index);
        Some(color)
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }
}
