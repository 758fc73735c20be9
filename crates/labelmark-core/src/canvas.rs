//! Annotation canvas: owns the scene and every entity drawn on it.

use crate::error::{AnnotationError, AnnotationResult, AttachmentPart};
use crate::geometry::fit_to_canvas;
use crate::options::{AnnotationOptions, PanZoomConfig, PolylineStyle};
use crate::pan_zoom::PanZoomController;
use crate::scene::{NodeId, Scene};
use crate::shapes::{Arrow, ConnectedAnnotation, EntityId, Label};
use crate::tools::PolylineSession;
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashMap;

/// Something a drag gesture can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The label half of a connected annotation.
    Label(EntityId),
    /// The arrowhead of a connected annotation.
    ArrowHead(EntityId),
    /// The zoomed background image.
    Background,
}

impl DragTarget {
    /// The annotation and part this target refers to, if any.
    fn attachment(self) -> Option<(EntityId, AttachmentPart)> {
        match self {
            DragTarget::Label(id) => Some((id, AttachmentPart::Label)),
            DragTarget::ArrowHead(id) => Some((id, AttachmentPart::Arrow)),
            DragTarget::Background => None,
        }
    }
}

/// An annotation canvas on top of a background image.
///
/// Free labels and arrows are static. Attaching an arrow to a label turns the
/// pair into a [`ConnectedAnnotation`] whose parts are both draggable.
#[derive(Debug)]
pub struct Canvas<S: Scene> {
    scene: S,
    size: Size,
    labels: HashMap<EntityId, Label>,
    arrows: HashMap<EntityId, Arrow>,
    connected: HashMap<EntityId, ConnectedAnnotation>,
    polyline: PolylineSession,
    background: Option<PanZoomController>,
    pan_zoom: PanZoomConfig,
}

impl<S: Scene> Canvas<S> {
    pub fn new(scene: S, size: Size) -> Self {
        Self {
            scene,
            size,
            labels: HashMap::new(),
            arrows: HashMap::new(),
            connected: HashMap::new(),
            polyline: PolylineSession::new(PolylineStyle::default()),
            background: None,
            pan_zoom: PanZoomConfig::default(),
        }
    }

    pub fn with_polyline_style(mut self, style: PolylineStyle) -> Self {
        self.polyline = PolylineSession::new(style);
        self
    }

    pub fn with_pan_zoom(mut self, config: PanZoomConfig) -> Self {
        self.pan_zoom = config;
        self
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Place a background image, scaled to fit the canvas.
    ///
    /// Replaces any previous background. Returns the placed rectangle.
    pub fn set_background(
        &mut self,
        source: impl Into<String>,
        natural: Size,
    ) -> AnnotationResult<Rect> {
        if let Some(old) = self.background.take() {
            old.remove(&mut self.scene)?;
        }
        let rect = Rect::from_origin_size(Point::ZERO, fit_to_canvas(natural, self.size));
        let controller =
            PanZoomController::new(&mut self.scene, source, rect, self.pan_zoom.clone())?;
        log::info!("Background placed at {}x{}", rect.width(), rect.height());
        self.background = Some(controller);
        Ok(rect)
    }

    pub fn background(&self) -> Option<&PanZoomController> {
        self.background.as_ref()
    }

    pub fn create_label(
        &mut self,
        position: Point,
        text: impl Into<String>,
        options: &AnnotationOptions,
    ) -> AnnotationResult<EntityId> {
        let label = Label::create(&mut self.scene, position, text, options)?;
        let id = label.id();
        self.labels.insert(id, label);
        Ok(id)
    }

    /// Attach an arrow pointing at `tip` to a free label.
    ///
    /// The label stops being free and is owned by the new annotation, whose
    /// id is returned.
    pub fn create_connected_arrow(
        &mut self,
        label: EntityId,
        tip: Point,
        options: &AnnotationOptions,
    ) -> AnnotationResult<EntityId> {
        let Some(free) = self.labels.get(&label) else {
            return Err(if self.contains(label) {
                AnnotationError::NotALabel(label)
            } else {
                AnnotationError::UnknownEntity(label)
            });
        };
        ConnectedAnnotation::ensure_label_attached(&self.scene, free)?;
        let Some(free) = self.labels.remove(&label) else {
            return Err(AnnotationError::UnknownEntity(label));
        };
        let annotation = ConnectedAnnotation::new(&mut self.scene, free, tip, options)?;
        let id = annotation.id();
        self.connected.insert(id, annotation);
        Ok(id)
    }

    pub fn create_arrow(
        &mut self,
        start: Point,
        end: Point,
        options: &AnnotationOptions,
    ) -> EntityId {
        let arrow = Arrow::create(&mut self.scene, start, end, options);
        let id = arrow.id();
        self.arrows.insert(id, arrow);
        id
    }

    /// Move both endpoints of a free arrow.
    pub fn update_arrow(&mut self, id: EntityId, start: Point, end: Point) -> AnnotationResult<()> {
        let arrow = self
            .arrows
            .get_mut(&id)
            .ok_or(AnnotationError::UnknownEntity(id))?;
        arrow.update(&mut self.scene, start, end)?;
        Ok(())
    }

    pub fn label(&self, id: EntityId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn arrow(&self, id: EntityId) -> Option<&Arrow> {
        self.arrows.get(&id)
    }

    pub fn connected(&self, id: EntityId) -> Option<&ConnectedAnnotation> {
        self.connected.get(&id)
    }

    /// Whether `id` names any entity on this canvas.
    pub fn contains(&self, id: EntityId) -> bool {
        self.labels.contains_key(&id)
            || self.arrows.contains_key(&id)
            || self.connected.contains_key(&id)
    }

    /// Find what a gesture on scene node `node` should drag.
    pub fn drag_target_at(&self, node: NodeId) -> Option<DragTarget> {
        for (id, annotation) in &self.connected {
            if annotation.label().nodes().contains(&node) {
                return Some(DragTarget::Label(*id));
            }
            if annotation.arrow().head_node() == node {
                return Some(DragTarget::ArrowHead(*id));
            }
        }
        self.background
            .as_ref()
            .filter(|bg| bg.node() == node && bg.is_draggable())
            .map(|_| DragTarget::Background)
    }

    fn annotation_mut(&mut self, id: EntityId) -> AnnotationResult<&mut ConnectedAnnotation> {
        self.connected
            .get_mut(&id)
            .ok_or(AnnotationError::UnknownEntity(id))
    }

    /// Start a gesture. Returns `false` if the target cannot be dragged now.
    pub fn begin_drag(&mut self, target: DragTarget) -> AnnotationResult<bool> {
        match target.attachment() {
            Some((id, part)) => {
                let annotation = self
                    .connected
                    .get_mut(&id)
                    .ok_or(AnnotationError::UnknownEntity(id))?;
                annotation.begin_drag(&self.scene, part)?;
                Ok(true)
            }
            None => {
                let bg = self.background.as_mut().ok_or(AnnotationError::NoBackground)?;
                Ok(bg.begin_drag(&mut self.scene)?)
            }
        }
    }

    /// Apply a delta measured from where the gesture started.
    pub fn drag_move(&mut self, target: DragTarget, delta: Vec2) -> AnnotationResult<()> {
        match target.attachment() {
            Some((id, part)) => {
                let annotation = self
                    .connected
                    .get_mut(&id)
                    .ok_or(AnnotationError::UnknownEntity(id))?;
                annotation.drag_move(&mut self.scene, part, delta)
            }
            None => {
                let bg = self.background.as_mut().ok_or(AnnotationError::NoBackground)?;
                bg.drag_move(&mut self.scene, delta)?;
                Ok(())
            }
        }
    }

    pub fn end_drag(&mut self, target: DragTarget) -> AnnotationResult<()> {
        match target.attachment() {
            Some((id, part)) => {
                self.annotation_mut(id)?.end_drag(part);
                Ok(())
            }
            None => {
                let bg = self.background.as_mut().ok_or(AnnotationError::NoBackground)?;
                Ok(bg.end_drag(&mut self.scene)?)
            }
        }
    }

    /// Forward a click to the polyline tool. Returns whether it was recorded.
    pub fn click(&mut self, point: Point) -> AnnotationResult<bool> {
        Ok(self.polyline.click(&mut self.scene, point)?)
    }

    pub fn polyline(&self) -> &PolylineSession {
        &self.polyline
    }

    pub fn enable_polyline(&mut self) {
        self.polyline.start();
    }

    pub fn disable_polyline(&mut self) {
        self.polyline.stop();
    }

    /// Clear the polyline drawn so far.
    pub fn reset_polyline(&mut self) -> AnnotationResult<()> {
        Ok(self.polyline.reset(&mut self.scene)?)
    }

    pub fn zoom_in(&mut self) -> AnnotationResult<f64> {
        let step = self.pan_zoom.step;
        let bg = self.background.as_mut().ok_or(AnnotationError::NoBackground)?;
        bg.zoom_in(&mut self.scene, step)?;
        Ok(bg.zoom())
    }

    pub fn zoom_out(&mut self) -> AnnotationResult<f64> {
        let step = self.pan_zoom.step;
        let bg = self.background.as_mut().ok_or(AnnotationError::NoBackground)?;
        bg.zoom_out(&mut self.scene, step)?;
        Ok(bg.zoom())
    }

    /// Remove one entity and its scene nodes.
    pub fn remove(&mut self, id: EntityId) -> AnnotationResult<()> {
        if let Some(label) = self.labels.remove(&id) {
            label.remove(&mut self.scene)?;
        } else if let Some(arrow) = self.arrows.remove(&id) {
            arrow.remove(&mut self.scene)?;
        } else if let Some(annotation) = self.connected.remove(&id) {
            annotation.remove(&mut self.scene)?;
        } else {
            return Err(AnnotationError::UnknownEntity(id));
        }
        log::debug!("Removed annotation {id}");
        Ok(())
    }

    /// Drop every annotation and the polyline; the background returns to
    /// its original placement.
    pub fn reset(&mut self) -> AnnotationResult<()> {
        for (_, label) in self.labels.drain() {
            label.remove(&mut self.scene)?;
        }
        for (_, arrow) in self.arrows.drain() {
            arrow.remove(&mut self.scene)?;
        }
        for (_, annotation) in self.connected.drain() {
            annotation.remove(&mut self.scene)?;
        }
        self.polyline.reset(&mut self.scene)?;
        if let Some(bg) = self.background.as_mut() {
            bg.reset(&mut self.scene)?;
        }
        log::info!("Canvas reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::centroid;
    use crate::scene::RetainedScene;

    fn canvas() -> Canvas<RetainedScene> {
        Canvas::new(RetainedScene::new(), Size::new(404.0, 500.0))
    }

    #[test]
    fn test_connect_consumes_free_label() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default();
        let label = canvas.create_label(Point::new(31.0, 90.0), "Label 1", &opts).unwrap();
        let annotation = canvas
            .create_connected_arrow(label, Point::new(98.0, 60.0), &opts)
            .unwrap();

        assert!(canvas.label(label).is_none());
        let connected = canvas.connected(annotation).unwrap();
        assert_eq!(connected.label().id(), label);
        assert_eq!(connected.arrow().end(), Point::new(98.0, 60.0));

        assert_eq!(
            canvas.create_connected_arrow(label, Point::ZERO, &opts),
            Err(AnnotationError::UnknownEntity(label))
        );
        assert_eq!(
            canvas.create_connected_arrow(annotation, Point::ZERO, &opts),
            Err(AnnotationError::NotALabel(annotation))
        );
    }

    #[test]
    fn test_failed_connect_keeps_label() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default();
        let label = canvas.create_label(Point::new(31.0, 90.0), "Label 1", &opts).unwrap();
        let border = canvas.label(label).unwrap().border_node();
        canvas.scene_mut().remove(border).unwrap();

        assert_eq!(
            canvas.create_connected_arrow(label, Point::new(98.0, 60.0), &opts),
            Err(AnnotationError::MissingAttachment {
                annotation: label,
                part: AttachmentPart::Label,
            })
        );
        assert!(canvas.label(label).is_some());
        assert_eq!(canvas.scene().len(), 1);

        canvas.remove(label).unwrap();
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_drag_routing() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default().with_bounds(Rect::new(0.0, 0.0, 404.0, 500.0));
        let label = canvas.create_label(Point::new(60.0, 120.0), "Label 2", &opts).unwrap();
        let id = canvas
            .create_connected_arrow(label, Point::new(140.0, 60.0), &opts)
            .unwrap();

        let (text, head) = {
            let a = canvas.connected(id).unwrap();
            (a.label().text_node(), a.arrow().head_node())
        };
        assert_eq!(canvas.drag_target_at(text), Some(DragTarget::Label(id)));
        assert_eq!(canvas.drag_target_at(head), Some(DragTarget::ArrowHead(id)));

        let target = DragTarget::Label(id);
        assert!(canvas.begin_drag(target).unwrap());
        canvas.drag_move(target, Vec2::new(20.0, 20.0)).unwrap();
        canvas.end_drag(target).unwrap();

        let target = DragTarget::ArrowHead(id);
        canvas.begin_drag(target).unwrap();
        canvas.drag_move(target, Vec2::new(-10.0, 5.0)).unwrap();
        canvas.end_drag(target).unwrap();

        let a = canvas.connected(id).unwrap();
        let c = centroid(a.label().bbox(canvas.scene()).unwrap());
        assert!((a.arrow().start() - c).hypot() < 1e-9);
        assert_eq!(a.arrow().end(), Point::new(130.0, 65.0));
    }

    #[test]
    fn test_free_arrow_update() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default();
        let id = canvas.create_arrow(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &opts);
        canvas
            .update_arrow(id, Point::new(5.0, 5.0), Point::new(50.0, 50.0))
            .unwrap();
        assert_eq!(canvas.arrow(id).unwrap().end(), Point::new(50.0, 50.0));
        assert!(canvas.drag_target_at(canvas.arrow(id).unwrap().head_node()).is_none());

        let label = canvas.create_label(Point::ZERO, "x", &opts).unwrap();
        assert_eq!(
            canvas.update_arrow(label, Point::ZERO, Point::ZERO),
            Err(AnnotationError::UnknownEntity(label))
        );
    }

    #[test]
    fn test_background_zoom_and_pan() {
        let mut canvas = canvas();
        assert_eq!(canvas.zoom_in(), Err(AnnotationError::NoBackground));

        let rect = canvas.set_background("chick.jpg", Size::new(800.0, 600.0)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 404.0, 303.0));
        let node = canvas.background().unwrap().node();
        assert!(canvas.drag_target_at(node).is_none());
        assert!(!canvas.begin_drag(DragTarget::Background).unwrap());

        let zoom = canvas.zoom_in().unwrap();
        assert!((zoom - 1.1).abs() < 1e-9);
        assert_eq!(canvas.drag_target_at(node), Some(DragTarget::Background));
        assert!(canvas.begin_drag(DragTarget::Background).unwrap());
        canvas.drag_move(DragTarget::Background, Vec2::new(-5.0, -5.0)).unwrap();
        canvas.end_drag(DragTarget::Background).unwrap();
        let moved = canvas.scene().bbox(node).unwrap();
        assert!((moved.x0 + 5.0).abs() < 1e-9 && (moved.y0 + 5.0).abs() < 1e-9);

        assert_eq!(canvas.zoom_out().unwrap(), 1.0);
        assert_eq!(canvas.scene().bbox(node).unwrap(), rect);
    }

    #[test]
    fn test_background_stays_behind_annotations() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default();
        canvas.create_label(Point::new(50.0, 50.0), "early", &opts).unwrap();
        canvas.set_background("bg.png", Size::new(100.0, 100.0)).unwrap();
        let node = canvas.background().unwrap().node();
        assert_eq!(canvas.scene().z_index(node), Some(0));
    }

    #[test]
    fn test_click_goes_to_polyline() {
        let mut canvas = canvas();
        assert!(!canvas.click(Point::new(1.0, 1.0)).unwrap());
        canvas.enable_polyline();
        canvas.click(Point::new(1.0, 1.0)).unwrap();
        canvas.click(Point::new(5.0, 1.0)).unwrap();
        assert_eq!(canvas.polyline().segments().len(), 1);
        canvas.reset_polyline().unwrap();
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_remove_and_reset() {
        let mut canvas = canvas();
        let opts = AnnotationOptions::default();
        let label = canvas.create_label(Point::new(10.0, 10.0), "a", &opts).unwrap();
        let connected = canvas
            .create_connected_arrow(label, Point::new(90.0, 90.0), &opts)
            .unwrap();
        let arrow = canvas.create_arrow(Point::ZERO, Point::new(1.0, 1.0), &opts);

        canvas.remove(connected).unwrap();
        assert_eq!(canvas.scene().len(), 2);
        assert_eq!(canvas.remove(connected), Err(AnnotationError::UnknownEntity(connected)));

        canvas.create_label(Point::new(10.0, 10.0), "b", &opts).unwrap();
        canvas.enable_polyline();
        canvas.click(Point::new(3.0, 3.0)).unwrap();
        canvas.set_background("bg.png", Size::new(10.0, 10.0)).unwrap();
        canvas.reset().unwrap();

        assert!(!canvas.contains(arrow));
        assert_eq!(canvas.scene().len(), 1);
    }
}
