//! Text label with a padded border.

use super::EntityId;
use crate::drag::DragOrigin;
use crate::error::SceneResult;
use crate::options::{AnnotationOptions, SerializableColor};
use crate::scene::{Cursor, NodeId, Primitive, Scene, Style};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// A text run on top of a border rectangle sized to the text plus padding.
///
/// The border is always stacked directly behind the text.
#[derive(Debug, Clone)]
pub struct Label {
    pub(crate) id: EntityId,
    text: NodeId,
    border: NodeId,
    /// Center of the text run.
    pub position: Point,
    pub content: String,
    pub color: SerializableColor,
    pub font_size: f64,
    pub padding: f64,
    pub background_color: SerializableColor,
    drag: Option<DragOrigin>,
}

impl Label {
    /// Create a label centered on `position`.
    pub fn create<S: Scene>(
        scene: &mut S,
        position: Point,
        content: impl Into<String>,
        options: &AnnotationOptions,
    ) -> SceneResult<Self> {
        let content = content.into();
        let text = scene.insert(
            Primitive::Text {
                anchor: position,
                content: content.clone(),
                font_size: options.font_size,
            },
            Style::filled(options.color),
        );
        let text_bounds = scene.bbox(text)?;
        let border = scene.insert(
            Primitive::Rect(text_bounds.inflate(options.padding, options.padding)),
            Style::stroked(options.color, 1.0).with_fill(options.background_color),
        );
        scene.insert_before(border, text)?;

        Ok(Self {
            id: Uuid::new_v4(),
            text,
            border,
            position,
            content,
            color: options.color,
            font_size: options.font_size,
            padding: options.padding,
            background_color: options.background_color,
            drag: None,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn text_node(&self) -> NodeId {
        self.text
    }

    pub fn border_node(&self) -> NodeId {
        self.border
    }

    /// Both scene nodes, border first.
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.border, self.text]
    }

    /// Current bounding box of text and border together.
    pub fn bbox<S: Scene>(&self, scene: &S) -> SceneResult<Rect> {
        Ok(scene.bbox(self.border)?.union(scene.bbox(self.text)?))
    }

    /// Move text and border together.
    pub fn translate<S: Scene>(&mut self, scene: &mut S, delta: Vec2) -> SceneResult<()> {
        scene.translate(self.text, delta)?;
        scene.translate(self.border, delta)?;
        self.position += delta;
        Ok(())
    }

    /// Set the pointer cursor on both nodes.
    pub fn set_cursor<S: Scene>(&self, scene: &mut S, cursor: Cursor) -> SceneResult<()> {
        for node in self.nodes() {
            let style = scene.style(node)?.clone().with_cursor(cursor);
            scene.set_style(node, style)?;
        }
        Ok(())
    }

    /// Capture the gesture-start box.
    pub fn begin_drag<S: Scene>(&mut self, scene: &S) -> SceneResult<()> {
        let bbox = self.bbox(scene)?;
        self.drag = Some(DragOrigin::new(bbox, bbox.origin()));
        Ok(())
    }

    /// Place the label at its gesture-start position plus the bounded delta.
    ///
    /// Returns `false` when no gesture is in progress.
    pub fn drag_move<S: Scene>(
        &mut self,
        scene: &mut S,
        delta: Vec2,
        bounds: Option<Rect>,
    ) -> SceneResult<bool> {
        let Some(origin) = self.drag else {
            log::debug!("Label {} moved without a drag in progress", self.id);
            return Ok(false);
        };
        let target = origin.target(delta, bounds);
        let current = self.bbox(scene)?.origin();
        self.translate(scene, target - current)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RetainedScene, TextMetrics};

    fn scene() -> RetainedScene {
        RetainedScene::new().with_metrics(TextMetrics {
            char_width: 0.5,
            line_height: 1.0,
        })
    }

    #[test]
    fn test_border_wraps_text_with_padding() {
        let mut scene = scene();
        let opts = AnnotationOptions::default();
        let label = Label::create(&mut scene, Point::new(100.0, 100.0), "Label 1", &opts).unwrap();

        let text = scene.bbox(label.text_node()).unwrap();
        let border = scene.bbox(label.border_node()).unwrap();
        assert!((border.width() - (text.width() + 10.0)).abs() < 1e-9);
        assert!((border.height() - (text.height() + 10.0)).abs() < 1e-9);
        assert_eq!(label.bbox(&scene).unwrap(), border);
    }

    #[test]
    fn test_border_stacked_behind_text() {
        let mut scene = scene();
        let label = Label::create(
            &mut scene,
            Point::new(0.0, 0.0),
            "x",
            &AnnotationOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.stacking_order(), &[label.border_node(), label.text_node()]);
    }

    #[test]
    fn test_translate_moves_both_nodes() {
        let mut scene = scene();
        let mut label = Label::create(
            &mut scene,
            Point::new(50.0, 50.0),
            "move me",
            &AnnotationOptions::default(),
        )
        .unwrap();
        let before = label.bbox(&scene).unwrap();
        label.translate(&mut scene, Vec2::new(12.0, -4.0)).unwrap();
        assert_eq!(label.bbox(&scene).unwrap(), before + Vec2::new(12.0, -4.0));
        assert_eq!(label.position, Point::new(62.0, 46.0));
    }

    #[test]
    fn test_bounded_drag_rejects_axis() {
        let mut scene = scene();
        let mut label = Label::create(
            &mut scene,
            Point::new(50.0, 50.0),
            "ab",
            &AnnotationOptions::default(),
        )
        .unwrap();
        let bounds = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
        let start = label.bbox(&scene).unwrap();

        label.begin_drag(&scene).unwrap();
        assert!(label.drag_move(&mut scene, Vec2::new(10.0, 10.0), bounds).unwrap());
        assert_eq!(label.bbox(&scene).unwrap(), start + Vec2::new(10.0, 10.0));

        // x would leave the bounds, so it returns to the gesture origin
        label.drag_move(&mut scene, Vec2::new(200.0, 20.0), bounds).unwrap();
        assert_eq!(label.bbox(&scene).unwrap(), start + Vec2::new(0.0, 20.0));
        label.end_drag();

        assert!(!label.drag_move(&mut scene, Vec2::new(1.0, 1.0), bounds).unwrap());
    }

    #[test]
    fn test_remove() {
        let mut scene = scene();
        let label =
            Label::create(&mut scene, Point::ZERO, "bye", &AnnotationOptions::default()).unwrap();
        scene.remove(label.text_node()).unwrap();
        label.remove(&mut scene).unwrap();
        assert!(scene.is_empty());
    }
}
