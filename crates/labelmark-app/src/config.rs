//! Application configuration.

use crate::error::{AppError, AppResult};
use kurbo::Size;
use labelmark_core::{AnnotationOptions, PanZoomConfig, PolylineStyle, SerializableColor};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub background_color: SerializableColor,
    /// Options used when a script action does not carry its own.
    pub options: AnnotationOptions,
    pub polyline: PolylineStyle,
    pub pan_zoom: PanZoomConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 404,
            height: 500,
            background_color: SerializableColor::white(),
            options: AnnotationOptions::default(),
            polyline: PolylineStyle::default(),
            pan_zoom: PanZoomConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load from `path`, falling back to defaults when no file is given or
    /// the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    pub fn background(&self) -> Color {
        self.background_color.into()
    }
}
