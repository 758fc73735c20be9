//! A label with an arrow whose base stays pinned to the label's center.

use super::{Arrow, EntityId, Label};
use crate::error::{AnnotationError, AnnotationResult, AttachmentPart};
use crate::geometry::centroid;
use crate::options::AnnotationOptions;
use crate::scene::{Cursor, Scene};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// A label paired with an arrow pointing away from it.
///
/// The arrow's start is always the centroid of the label's bounding box and
/// its end is the free tip. Both parts are draggable: dragging the head moves
/// the tip, dragging the label moves the label and then re-pins the arrow.
/// Both arrow nodes are stacked below the label border.
#[derive(Debug, Clone)]
pub struct ConnectedAnnotation {
    id: EntityId,
    label: Label,
    arrow: Arrow,
    bounds: Option<Rect>,
}

impl ConnectedAnnotation {
    /// Attach a new arrow to `label`, pointing at `tip`.
    ///
    /// `options` supplies the arrow styling and the drag bounds.
    pub fn new<S: Scene>(
        scene: &mut S,
        label: Label,
        tip: Point,
        options: &AnnotationOptions,
    ) -> AnnotationResult<Self> {
        Self::ensure_label_attached(scene, &label)?;
        let start = centroid(label.bbox(scene)?);
        let arrow = Arrow::create(scene, start, tip, options);
        scene.insert_before(arrow.head_node(), label.border_node())?;
        scene.insert_before(arrow.line_node(), label.border_node())?;

        arrow.set_head_cursor(scene, Cursor::Move)?;
        label.set_cursor(scene, Cursor::Move)?;

        Ok(Self {
            id: Uuid::new_v4(),
            label,
            arrow,
            bounds: options.bounds,
        })
    }

    /// Fail unless both nodes of a label that is about to be connected are
    /// still in the scene. The error names the label.
    pub fn ensure_label_attached<S: Scene>(scene: &S, label: &Label) -> AnnotationResult<()> {
        if label.nodes().iter().all(|&n| scene.contains(n)) {
            Ok(())
        } else {
            Err(AnnotationError::MissingAttachment {
                annotation: label.id(),
                part: AttachmentPart::Label,
            })
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn arrow(&self) -> &Arrow {
        &self.arrow
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Give up ownership of both parts.
    pub fn into_parts(self) -> (Label, Arrow) {
        (self.label, self.arrow)
    }

    fn missing(&self, part: AttachmentPart) -> AnnotationError {
        AnnotationError::MissingAttachment {
            annotation: self.id,
            part,
        }
    }

    /// Fail unless every node of both parts is still in the scene.
    pub fn ensure_attached<S: Scene>(&self, scene: &S) -> AnnotationResult<()> {
        if !self.label.nodes().iter().all(|&n| scene.contains(n)) {
            return Err(self.missing(AttachmentPart::Label));
        }
        if !self.arrow.nodes().iter().all(|&n| scene.contains(n)) {
            return Err(self.missing(AttachmentPart::Arrow));
        }
        Ok(())
    }

    /// Re-pin the arrow's start to the label's current centroid.
    pub fn resync<S: Scene>(&mut self, scene: &mut S) -> AnnotationResult<()> {
        self.ensure_attached(scene)?;
        let start = centroid(self.label.bbox(scene)?);
        let end = self.arrow.end();
        self.arrow.update(scene, start, end)?;
        Ok(())
    }

    /// Start a gesture on one part.
    pub fn begin_drag<S: Scene>(
        &mut self,
        scene: &S,
        part: AttachmentPart,
    ) -> AnnotationResult<()> {
        self.ensure_attached(scene)?;
        match part {
            AttachmentPart::Label => self.label.begin_drag(scene)?,
            AttachmentPart::Arrow => self.arrow.begin_head_drag(scene)?,
        }
        Ok(())
    }

    /// Apply a gesture delta (relative to gesture start) to one part.
    ///
    /// Label moves are followed by a resync in the same call, so the arrow
    /// never trails the label.
    pub fn drag_move<S: Scene>(
        &mut self,
        scene: &mut S,
        part: AttachmentPart,
        delta: Vec2,
    ) -> AnnotationResult<()> {
        self.ensure_attached(scene)?;
        match part {
            AttachmentPart::Label => {
                if self.label.drag_move(scene, delta, self.bounds)? {
                    self.resync(scene)?;
                }
            }
            AttachmentPart::Arrow => {
                self.arrow.drag_head(scene, delta, self.bounds)?;
            }
        }
        Ok(())
    }

    pub fn end_drag(&mut self, part: AttachmentPart) {
        match part {
            AttachmentPart::Label => self.label.end_drag(),
            AttachmentPart::Arrow => self.arrow.end_drag(),
        }
    }

    /// Remove all four nodes, skipping any already gone.
    pub fn remove<S: Scene>(&self, scene: &mut S) -> AnnotationResult<()> {
        self.arrow.remove(scene)?;
        self.label.remove(scene)?;
        Ok(())
    }
}
