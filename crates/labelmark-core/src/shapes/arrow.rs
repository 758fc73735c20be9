//! Arrow entity: a shaft line plus a filled triangular head.

use super::EntityId;
use crate::drag::DragOrigin;
use crate::error::{SceneError, SceneResult};
use crate::options::AnnotationOptions;
use crate::path::{ArrowPaths, HeadSize, build_arrow_paths};
use crate::scene::{Cursor, NodeId, Primitive, Scene, Style};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// An arrow from `start` (base) to `end` (tip).
///
/// The head size is fixed at creation; only the endpoints change afterwards.
#[derive(Debug, Clone)]
pub struct Arrow {
    pub(crate) id: EntityId,
    line: NodeId,
    head: NodeId,
    start: Point,
    end: Point,
    size: HeadSize,
    drag: Option<DragOrigin>,
}

impl Arrow {
    /// Create an arrow and add its shaft and head to the scene.
    pub fn create<S: Scene>(
        scene: &mut S,
        start: Point,
        end: Point,
        options: &AnnotationOptions,
    ) -> Self {
        let size = HeadSize::new(options.arrow_width, options.arrow_height);
        let paths = build_arrow_paths(start, end, size);
        let line = scene.insert(
            Primitive::Path(paths.line),
            Style::stroked(options.color, options.line_width),
        );
        let head = scene.insert(
            Primitive::Path(paths.head),
            Style::filled(options.color).with_stroke(options.color),
        );

        Self {
            id: Uuid::new_v4(),
            line,
            head,
            start,
            end,
            size,
            drag: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn size(&self) -> HeadSize {
        self.size
    }

    pub fn line_node(&self) -> NodeId {
        self.line
    }

    pub fn head_node(&self) -> NodeId {
        self.head
    }

    /// Both scene nodes, shaft first.
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.line, self.head]
    }

    /// Path data for the current endpoints.
    pub fn paths(&self) -> ArrowPaths {
        build_arrow_paths(self.start, self.end, self.size)
    }

    /// Recompute both paths for new endpoints.
    pub fn update<S: Scene>(&mut self, scene: &mut S, start: Point, end: Point) -> SceneResult<()> {
        if let Some(&missing) = self.nodes().iter().find(|&&n| !scene.contains(n)) {
            return Err(SceneError::UnknownNode(missing));
        }
        let paths = build_arrow_paths(start, end, self.size);
        scene.set_primitive(self.head, Primitive::Path(paths.head))?;
        scene.set_primitive(self.line, Primitive::Path(paths.line))?;
        self.start = paths.start;
        self.end = paths.end;
        Ok(())
    }

    pub fn head_bbox<S: Scene>(&self, scene: &S) -> SceneResult<Rect> {
        scene.bbox(self.head)
    }

    pub fn set_head_cursor<S: Scene>(&self, scene: &mut S, cursor: Cursor) -> SceneResult<()> {
        let style = scene.style(self.head)?.clone().with_cursor(cursor);
        scene.set_style(self.head, style)
    }

    /// Capture the head's gesture-start box and tip.
    pub fn begin_head_drag<S: Scene>(&mut self, scene: &S) -> SceneResult<()> {
        self.drag = Some(DragOrigin::new(self.head_bbox(scene)?, self.end));
        Ok(())
    }

    /// Move the tip by the bounded delta; the base stays put.
    ///
    /// Returns `false` when no gesture is in progress.
    pub fn drag_head<S: Scene>(
        &mut self,
        scene: &mut S,
        delta: Vec2,
        bounds: Option<Rect>,
    ) -> SceneResult<bool> {
        let Some(origin) = self.drag else {
            log::debug!("Arrow {} head moved without a drag in progress", self.id);
            return Ok(false);
        };
        let end = origin.target(delta, bounds);
        self.update(scene, self.start, end)?;
        Ok(true)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Remove both nodes from the scene, skipping any already gone.
    pub fn remove<S: Scene>(&self, scene: &mut S) -> SceneResult<()> {
        for node in self.nodes() {
            if scene.contains(node) {
                scene.remove(node)?;
            }
        }
        Ok(())
    }
}
