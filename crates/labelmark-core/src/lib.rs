//! LabelMark Core Library
//!
//! Geometry, bounded dragging and annotation entities for marking up a
//! raster image with labels, arrows and click-drawn polylines.

pub mod canvas;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod options;
pub mod pan_zoom;
pub mod path;
pub mod scene;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, DragTarget};
pub use drag::{DragOrigin, clamp_delta};
pub use error::{AnnotationError, AnnotationResult, AttachmentPart, SceneError, SceneResult};
pub use geometry::{centroid, fit_to_canvas, rotate_point};
pub use options::{AnnotationOptions, PanZoomConfig, PolylineStyle, SerializableColor};
pub use pan_zoom::PanZoomController;
pub use path::{ArrowPaths, HeadSize, PathCommand, PathData, build_arrow_paths};
pub use scene::{Cursor, NodeId, Primitive, RetainedScene, Scene, SceneNode, Style, TextMetrics};
pub use shapes::{Arrow, ConnectedAnnotation, EntityId, Label};
pub use tools::PolylineSession;
