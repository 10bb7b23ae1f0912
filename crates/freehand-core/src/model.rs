//! Brush data model: colors, brush sizes, and the active brush.
//!
//! Everything here is plain data. The renderer reads the brush on every
//! segment it draws, so these types are `Copy` and cheap to pass around.

use crate::error::SketchError;
use crate::surface::MAX_DIMENSION;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color value: hex (`#rgb`, `#rrggbb`, `#rrggbbaa`),
    /// functional (`rgb()`, `hsl()`, ...) or a named color.
    ///
    /// # Errors
    /// Returns [`SketchError::InvalidColor`] when the value is not a color.
    pub fn parse(value: &str) -> Result<Self, SketchError> {
        let trimmed = value.trim();
        let parsed = csscolorparser::parse(trimmed)
            .map_err(|_| SketchError::InvalidColor(trimmed.to_string()))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Self::from_rgba8(r, g, b, a))
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Channels quantized to 8 bits.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn channel_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Brush size ──────────────────────────────────────────────────────────

/// Stroke width in CSS pixels, from 1 to [`MAX_DIMENSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: Self = Self(1);
    pub const DEFAULT: Self = Self(5);
    /// Widest stroke; covers any surface that can be allocated.
    pub const MAX: Self = Self(MAX_DIMENSION);

    /// `None` for zero. Larger values are capped at [`BrushSize::MAX`].
    pub const fn new(px: u32) -> Option<Self> {
        if px == 0 {
            None
        } else if px > MAX_DIMENSION {
            Some(Self::MAX)
        } else {
            Some(Self(px))
        }
    }

    /// Parse a size control value, falling back to [`BrushSize::MIN`].
    ///
    /// Reads the leading integer the way a slider value is usually parsed:
    /// leading whitespace and a sign are accepted, parsing stops at the first
    /// non-digit (`"12px"` is 12, `"3.9"` is 3). Anything that does not yield
    /// a positive integer becomes 1. Oversized values become [`BrushSize::MAX`].
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let mut value: u32 = 0;
        let mut seen_digit = false;
        for b in digits.bytes() {
            if !b.is_ascii_digit() {
                break;
            }
            seen_digit = true;
            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
        }

        if !seen_digit || negative {
            return Self::MIN;
        }
        Self::new(value).unwrap_or(Self::MIN)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BrushSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for BrushSize {
    type Error = String;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::new(px).ok_or_else(|| "brush size must be at least 1".to_string())
    }
}

impl From<BrushSize> for u32 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}

// ─── Brush ───────────────────────────────────────────────────────────────

/// The brush applied to every new line segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrushState {
    pub size: BrushSize,
    pub color: Color,
}

impl BrushState {
    pub fn new(size: BrushSize, color: Color) -> Self {
        Self { size, color }
    }

    /// JSON snapshot for the UI: `{"size":5,"color":"#000000"}`.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "size": self.size.get(),
            "color": self.color.to_hex(),
        })
        .to_string()
    }
}
