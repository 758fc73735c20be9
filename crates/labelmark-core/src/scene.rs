//! Scene graph contract and an in-memory retained implementation.
//!
//! The rendering surface is an external collaborator: annotation entities
//! only talk to it through [`Scene`]. [`RetainedScene`] keeps every node and
//! the stacking order in memory so the entities can run headless and the
//! renderer can walk the result.

use crate::error::{SceneError, SceneResult};
use crate::options::SerializableColor;
use crate::path::PathData;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for scene nodes.
pub type NodeId = Uuid;

/// Geometry of a scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Open line or closed polygon, depending on the path's close command.
    Path(PathData),
    /// A text run centered on `anchor`.
    Text {
        anchor: Point,
        content: String,
        font_size: f64,
    },
    Rect(Rect),
    Circle {
        center: Point,
        radius: f64,
    },
    /// A raster image stretched over `rect`.
    Image {
        rect: Rect,
        source: String,
    },
}

impl Primitive {
    /// Offset the primitive by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Primitive::Path(path) => path.translate(delta),
            Primitive::Text { anchor, .. } => *anchor += delta,
            Primitive::Rect(rect) => *rect = *rect + delta,
            Primitive::Circle { center, .. } => *center += delta,
            Primitive::Image { rect, .. } => *rect = *rect + delta,
        }
    }
}

/// Pointer cursor shown over a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Move,
}

/// Presentation attributes of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<SerializableColor>,
    pub stroke_width: f64,
    pub fill: Option<SerializableColor>,
    #[serde(default)]
    pub cursor: Cursor,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 1.0,
            fill: None,
            cursor: Cursor::Default,
        }
    }
}

impl Style {
    /// Stroke-only style.
    pub fn stroked(color: SerializableColor, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Fill-only style.
    pub fn filled(color: SerializableColor) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: SerializableColor) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_fill(mut self, color: SerializableColor) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }
}

/// Operations the annotation layer needs from a rendering surface.
///
/// Stacking order runs back to front: index 0 is drawn first.
pub trait Scene {
    /// Add a node on top of the stack.
    fn insert(&mut self, primitive: Primitive, style: Style) -> NodeId;

    fn primitive(&self, id: NodeId) -> SceneResult<&Primitive>;

    /// Replace a node's geometry, keeping its style and stacking position.
    fn set_primitive(&mut self, id: NodeId, primitive: Primitive) -> SceneResult<()>;

    fn style(&self, id: NodeId) -> SceneResult<&Style>;

    fn set_style(&mut self, id: NodeId, style: Style) -> SceneResult<()>;

    /// Measured bounding box of a node.
    fn bbox(&self, id: NodeId) -> SceneResult<Rect>;

    fn translate(&mut self, id: NodeId, delta: Vec2) -> SceneResult<()>;

    /// Restack `id` directly below `other`.
    fn insert_before(&mut self, id: NodeId, other: NodeId) -> SceneResult<()>;

    /// Restack `id` on top of every other node.
    fn to_front(&mut self, id: NodeId) -> SceneResult<()>;

    fn remove(&mut self, id: NodeId) -> SceneResult<()>;

    /// Node ids from back to front.
    fn stacking_order(&self) -> &[NodeId];

    fn contains(&self, id: NodeId) -> bool {
        self.stacking_order().contains(&id)
    }

    /// Position of `id` in the stacking order.
    fn z_index(&self, id: NodeId) -> Option<usize> {
        self.stacking_order().iter().position(|&n| n == id)
    }
}

/// Approximate text measurement used when no font engine is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average glyph advance as a fraction of the font size.
    pub char_width: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 0.55,
            line_height: 1.2,
        }
    }
}

impl TextMetrics {
    /// Size of a text run at `font_size`.
    pub fn measure(&self, content: &str, font_size: f64) -> Size {
        let widest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = content.lines().count().max(1);
        Size::new(
            widest as f64 * font_size * self.char_width,
            lines as f64 * font_size * self.line_height,
        )
    }
}

/// A node held by [`RetainedScene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub primitive: Primitive,
    pub style: Style,
}

/// In-memory scene: nodes keyed by id plus a back-to-front stacking order.
#[derive(Debug, Clone, Default)]
pub struct RetainedScene {
    nodes: HashMap<NodeId, SceneNode>,
    order: Vec<NodeId>,
    metrics: TextMetrics,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom text metrics for measuring text nodes.
    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Nodes in stacking order (back to front).
    pub fn nodes_ordered(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|node| (*id, node)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }

    fn position(&self, id: NodeId) -> SceneResult<usize> {
        self.order
            .iter()
            .position(|&n| n == id)
            .ok_or(SceneError::UnknownNode(id))
    }
}

impl Scene for RetainedScene {
    fn insert(&mut self, primitive: Primitive, style: Style) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.insert(id, SceneNode { primitive, style });
        self.order.push(id);
        id
    }

    fn primitive(&self, id: NodeId) -> SceneResult<&Primitive> {
        self.nodes
            .get(&id)
            .map(|n| &n.primitive)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn set_primitive(&mut self, id: NodeId, primitive: Primitive) -> SceneResult<()> {
        self.node_mut(id)?.primitive = primitive;
        Ok(())
    }

    fn style(&self, id: NodeId) -> SceneResult<&Style> {
        self.nodes
            .get(&id)
            .map(|n| &n.style)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn set_style(&mut self, id: NodeId, style: Style) -> SceneResult<()> {
        self.node_mut(id)?.style = style;
        Ok(())
    }

    fn bbox(&self, id: NodeId) -> SceneResult<Rect> {
        let rect = match self.primitive(id)? {
            Primitive::Path(path) => path.bounds(),
            Primitive::Text {
                anchor,
                content,
                font_size,
            } => Rect::from_center_size(*anchor, self.metrics.measure(content, *font_size)),
            Primitive::Rect(rect) => *rect,
            Primitive::Circle { center, radius } => {
                Rect::from_center_size(*center, (radius * 2.0, radius * 2.0))
            }
            Primitive::Image { rect, .. } => *rect,
        };
        Ok(rect)
    }

    fn translate(&mut self, id: NodeId, delta: Vec2) -> SceneResult<()> {
        self.node_mut(id)?.primitive.translate(delta);
        Ok(())
    }

    fn insert_before(&mut self, id: NodeId, other: NodeId) -> SceneResult<()> {
        let from = self.position(id)?;
        self.position(other)?;
        if id == other {
            return Ok(());
        }
        self.order.remove(from);
        let to = self.position(other)?;
        self.order.insert(to, id);
        Ok(())
    }

    fn to_front(&mut self, id: NodeId) -> SceneResult<()> {
        let from = self.position(id)?;
        self.order.remove(from);
        self.order.push(id);
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> SceneResult<()> {
        let from = self.position(id)?;
        self.order.remove(from);
        self.nodes.remove(&id);
        Ok(())
    }

    fn stacking_order(&self) -> &[NodeId] {
        &self.order
    }
}
