//! Error types for scene and annotation operations.

use crate::scene::NodeId;
use crate::shapes::EntityId;
use std::fmt;
use thiserror::Error;

/// Errors raised by a scene implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("Unknown scene node: {0}")]
    UnknownNode(NodeId),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// The two halves of a connected annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentPart {
    Label,
    Arrow,
}

impl fmt::Display for AttachmentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentPart::Label => f.write_str("label"),
            AttachmentPart::Arrow => f.write_str("arrow"),
        }
    }
}

/// Errors raised by annotation entities and the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// A connected annotation's label or arrow was destroyed behind its back.
    #[error("Annotation {annotation} lost its {part}")]
    MissingAttachment {
        annotation: EntityId,
        part: AttachmentPart,
    },
    #[error("Unknown annotation: {0}")]
    UnknownEntity(EntityId),
    #[error("Annotation {0} is not a free label")]
    NotALabel(EntityId),
    #[error("No background image is set")]
    NoBackground,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for annotation operations.
pub type AnnotationResult<T> = Result<T, AnnotationError>;
