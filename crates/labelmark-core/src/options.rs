//! Annotation options and tool configuration.

use kurbo::{Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
///
/// Serializes as a hex string (`#rrggbb`, or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        match hex.len() {
            3 => Ok(Self::rgb(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(err()),
        }
    }

    /// Format as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Options recognized when creating labels and arrows.
///
/// Every field has a documented default; an explicit `0` is taken as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationOptions {
    /// Arrowhead half-width (default 5).
    pub arrow_width: f64,
    /// Arrowhead length along the shaft (default 15).
    pub arrow_height: f64,
    /// Shaft stroke width (default 2).
    pub line_width: f64,
    /// Stroke/fill color of arrows and label text and border (default `#660033`).
    pub color: SerializableColor,
    /// Label font size (default 16).
    pub font_size: f64,
    /// Space between label text and its border (default 5).
    pub padding: f64,
    /// Label background (default white).
    pub background_color: SerializableColor,
    /// Rectangle that dragged parts must stay inside.
    pub bounds: Option<Rect>,
}

impl AnnotationOptions {
    pub const DEFAULT_COLOR: SerializableColor = SerializableColor::rgb(0x66, 0x00, 0x33);

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            arrow_width: 5.0,
            arrow_height: 15.0,
            line_width: 2.0,
            color: Self::DEFAULT_COLOR,
            font_size: 16.0,
            padding: 5.0,
            background_color: SerializableColor::white(),
            bounds: None,
        }
    }
}

/// Appearance of polyline segments and vertex markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineStyle {
    pub segment_color: SerializableColor,
    pub segment_width: f64,
    pub marker_color: SerializableColor,
    pub marker_radius: f64,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            segment_color: SerializableColor::rgb(0x00, 0x99, 0x33),
            segment_width: 5.0,
            marker_color: SerializableColor::rgb(0x66, 0x99, 0xff),
            marker_radius: 10.0,
        }
    }
}

/// Background pan/zoom settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanZoomConfig {
    /// Reference viewport the zoomed image must keep covered while panning.
    pub viewport: Size,
    /// Zoom increment used by the zoom buttons.
    pub step: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(300.0, 300.0),
            step: 0.1,
        }
    }
}
