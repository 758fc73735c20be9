//! LabelMark Render Library
//!
//! Renderer abstraction and implementations for LabelMark.
//! The bundled implementation writes the scene out as an SVG document.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
