//! Recorded annotation sessions.
//!
//! A script is a JSON array of actions, each tagged by its `action` field:
//!
//! ```json
//! [
//!   {"action": "background", "source": "chick.jpg", "width": 800, "height": 600},
//!   {"action": "label", "name": "l1", "position": {"x": 31, "y": 90}, "text": "Label 1"},
//!   {"action": "connect", "name": "a1", "label": "l1", "tip": {"x": 98, "y": 60}},
//!   {"action": "drag", "part": "label", "name": "a1", "deltas": [{"x": 5, "y": 0}]}
//! ]
//! ```

use crate::error::{AppError, AppResult};
use kurbo::{Point, Vec2};
use labelmark_core::AnnotationOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which part of the canvas a drag acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPart {
    /// Label of a connected annotation.
    Label,
    /// Arrowhead of a connected annotation.
    Head,
    /// The zoomed background image.
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolylineMode {
    Enable,
    Disable,
    Reset,
}

/// One recorded user action. Entities are referred to by script-local names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Place the background image; `width`/`height` are its natural size.
    Background { source: String, width: f64, height: f64 },
    Label {
        name: String,
        position: Point,
        text: String,
        #[serde(default)]
        options: Option<AnnotationOptions>,
    },
    /// Attach an arrow to the free label `label`; `name` then refers to the pair.
    Connect {
        name: String,
        label: String,
        tip: Point,
        #[serde(default)]
        options: Option<AnnotationOptions>,
    },
    Arrow {
        name: String,
        start: Point,
        end: Point,
        #[serde(default)]
        options: Option<AnnotationOptions>,
    },
    UpdateArrow { name: String, start: Point, end: Point },
    /// One gesture: each delta is measured from where the gesture started.
    Drag {
        part: DragPart,
        #[serde(default)]
        name: Option<String>,
        deltas: Vec<Vec2>,
    },
    Click { position: Point },
    Polyline { mode: PolylineMode },
    ZoomIn,
    ZoomOut,
    Remove { name: String },
    Reset,
}

/// An ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Script(e.to_string()))
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Script(e.to_string()))
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} actions from {}", script.actions.len(), path.display());
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let script = Script::from_json(
            r#"[
                {"action": "label", "name": "l1", "position": {"x": 31, "y": 90}, "text": "Label 1",
                 "options": {"font_size": 12}},
                {"action": "connect", "name": "a1", "label": "l1", "tip": {"x": 98, "y": 60}},
                {"action": "drag", "part": "head", "name": "a1", "deltas": [{"x": 1, "y": 2}]},
                {"action": "drag", "part": "background", "deltas": []},
                {"action": "polyline", "mode": "enable"},
                {"action": "click", "position": {"x": 1, "y": 1}},
                {"action": "zoom_in"},
                {"action": "reset"}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.actions.len(), 8);
        match &script.actions[0] {
            Action::Label { options: Some(opts), .. } => {
                assert_eq!(opts.font_size, 12.0);
                assert_eq!(opts.padding, 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            script.actions[2],
            Action::Drag {
                part: DragPart::Head,
                name: Some("a1".into()),
                deltas: vec![Vec2::new(1.0, 2.0)],
            }
        );
        assert_eq!(script.actions[4], Action::Polyline { mode: PolylineMode::Enable });
        assert_eq!(script.actions[6], Action::ZoomIn);
    }

    #[test]
    fn test_unknown_action() {
        let err = Script::from_json(r#"[{"action": "undo"}]"#).unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
