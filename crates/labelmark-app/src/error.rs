//! Application errors.

use labelmark_core::AnnotationError;
use labelmark_render::RendererError;
use thiserror::Error;

/// Errors surfaced by the command-line shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("Invalid script: {0}")]
    Script(String),
    #[error("Unknown name in script: {0}")]
    UnknownName(String),
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
