//! Renderer trait abstraction.

use kurbo::Size;
use labelmark_core::scene::RetainedScene;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Write failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The scene to render, back to front.
    pub scene: &'a RetainedScene,
    /// Output size in pixels.
    pub viewport_size: Size,
    /// Device pixel ratio applied to the whole drawing.
    pub scale_factor: f64,
    /// Color behind everything, including the background image.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a RetainedScene, viewport_size: Size) -> Self {
        Self {
            scene,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
        }
    }

    /// Set the scale factor for HiDPI output.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the output for one render pass.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
