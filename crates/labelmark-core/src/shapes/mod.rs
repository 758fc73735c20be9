//! Annotation entities drawn over the canvas.

mod arrow;
mod connected;
mod label;

pub use arrow::Arrow;
pub use connected::ConnectedAnnotation;
pub use label::Label;

use uuid::Uuid;

/// Unique identifier for annotation entities.
pub type EntityId = Uuid;
