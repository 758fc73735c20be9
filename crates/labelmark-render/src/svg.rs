//! SVG renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use labelmark_core::options::SerializableColor;
use labelmark_core::scene::{Cursor, Primitive, SceneNode, Style};
use std::fmt::Write;

/// Renders a scene into an SVG document string.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

/// Escape text for use in XML content and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Paint attribute pair, with opacity only when the color is translucent.
fn paint(name: &str, color: Option<SerializableColor>) -> String {
    match color {
        None => format!(" {name}=\"none\""),
        Some(c) if c.a == 255 => format!(" {name}=\"{}\"", c.to_hex()),
        Some(c) => format!(
            " {name}=\"{}\" {name}-opacity=\"{:.3}\"",
            SerializableColor { a: 255, ..c }.to_hex(),
            c.a as f64 / 255.0
        ),
    }
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = paint("fill", style.fill);
    attrs.push_str(&paint("stroke", style.stroke));
    if style.stroke.is_some() {
        attrs.push_str(&format!(" stroke-width=\"{}\"", style.stroke_width));
    }
    if style.cursor == Cursor::Move {
        attrs.push_str(" cursor=\"move\"");
    }
    attrs
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the last render pass.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take ownership of the document, leaving an empty one.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    fn render_node(&mut self, node: &SceneNode) -> RenderResult<()> {
        let attrs = style_attrs(&node.style);
        match &node.primitive {
            Primitive::Path(path) => {
                writeln!(self.output, "  <path d=\"{path}\"{attrs}/>")?;
            }
            Primitive::Text {
                anchor,
                content,
                font_size,
            } => {
                writeln!(
                    self.output,
                    "  <text x=\"{}\" y=\"{}\" font-size=\"{font_size}\" text-anchor=\"middle\" dominant-baseline=\"central\"{attrs}>{}</text>",
                    anchor.x,
                    anchor.y,
                    escape_xml(content)
                )?;
            }
            Primitive::Rect(rect) => {
                writeln!(
                    self.output,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                )?;
            }
            Primitive::Circle { center, radius } => {
                writeln!(
                    self.output,
                    "  <circle cx=\"{}\" cy=\"{}\" r=\"{radius}\"{attrs}/>",
                    center.x, center.y
                )?;
            }
            Primitive::Image { rect, source } => {
                let cursor = if node.style.cursor == Cursor::Move {
                    " cursor=\"move\""
                } else {
                    ""
                };
                writeln!(
                    self.output,
                    "  <image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\"{cursor}/>",
                    escape_xml(source),
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                )?;
            }
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let size = ctx.viewport_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(RendererError::RenderFailed(format!(
                "invalid viewport {}x{}",
                size.width, size.height
            )));
        }

        self.output.clear();
        let width = size.width * ctx.scale_factor;
        let height = size.height * ctx.scale_factor;
        writeln!(
            self.output,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {} {}\">",
            size.width, size.height
        )?;

        let background = SerializableColor::from(self.background_color(ctx));
        writeln!(
            self.output,
            "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"{}/>",
            size.width,
            size.height,
            paint("fill", Some(background))
        )?;

        let mut count = 0;
        for (_, node) in ctx.scene.nodes_ordered() {
            self.render_node(node)?;
            count += 1;
        }
        self.output.push_str("</svg>\n");

        log::debug!("Rendered {count} nodes to SVG");
        Ok(())
    }
}
