//! Zooming and bounded panning of the background image.

use crate::drag::DragOrigin;
use crate::error::SceneResult;
use crate::options::PanZoomConfig;
use crate::scene::{Cursor, NodeId, Primitive, Scene, Style};
use kurbo::{Rect, Vec2};

/// Zoom level at which the image is shown at its placed size.
pub const BASE_ZOOM: f64 = 1.0;

/// Owns the background image node and its zoom/pan state.
///
/// The image scales about its top-left corner. Above [`BASE_ZOOM`] it can be
/// panned, bounded so the reference viewport stays covered; back at the base
/// level it snaps to its original placement and panning is disabled.
#[derive(Debug, Clone)]
pub struct PanZoomController {
    node: NodeId,
    home: Rect,
    zoom: f64,
    config: PanZoomConfig,
    drag: Option<DragOrigin>,
}

impl PanZoomController {
    /// Place `source` over `rect` at the back of the stacking order.
    pub fn new<S: Scene>(
        scene: &mut S,
        source: impl Into<String>,
        rect: Rect,
        config: PanZoomConfig,
    ) -> SceneResult<Self> {
        let node = scene.insert(
            Primitive::Image {
                rect,
                source: source.into(),
            },
            Style::default(),
        );
        if let Some(&bottom) = scene.stacking_order().first() {
            scene.insert_before(node, bottom)?;
        }

        Ok(Self {
            node,
            home: rect,
            zoom: BASE_ZOOM,
            config,
            drag: None,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// Original placement of the image.
    pub fn home(&self) -> Rect {
        self.home
    }

    /// Panning is only possible while zoomed in.
    pub fn is_draggable(&self) -> bool {
        self.zoom > BASE_ZOOM
    }

    fn current_rect<S: Scene>(&self, scene: &S) -> SceneResult<Rect> {
        scene.bbox(self.node)
    }

    fn set_rect<S: Scene>(&self, scene: &mut S, rect: Rect) -> SceneResult<()> {
        let source = match scene.primitive(self.node)? {
            Primitive::Image { source, .. } => source.clone(),
            _ => String::new(),
        };
        scene.set_primitive(self.node, Primitive::Image { rect, source })
    }

    fn apply_zoom<S: Scene>(&mut self, scene: &mut S, zoom: f64) -> SceneResult<()> {
        // Snap values that land on the base level through float drift.
        if zoom <= BASE_ZOOM + 1e-9 {
            if self.zoom > BASE_ZOOM {
                log::info!("Image zoom back to base, panning disabled");
            }
            self.zoom = BASE_ZOOM;
            self.drag = None;
            return self.reset(scene);
        }

        let origin = self.current_rect(scene)?.origin();
        self.zoom = zoom;
        let size = self.home.size() * zoom;
        self.set_rect(scene, Rect::from_origin_size(origin, size))
    }

    /// Zoom in by `step`.
    pub fn zoom_in<S: Scene>(&mut self, scene: &mut S, step: f64) -> SceneResult<()> {
        self.apply_zoom(scene, self.zoom + step)
    }

    /// Zoom out by `step`, never below [`BASE_ZOOM`].
    pub fn zoom_out<S: Scene>(&mut self, scene: &mut S, step: f64) -> SceneResult<()> {
        self.apply_zoom(scene, self.zoom - step)
    }

    /// Region the image may occupy while panning.
    ///
    /// With viewport `V` and rendered size `w x h` this is
    /// `(V.w - w, V.h - h)` sized `(2w - V.w, 2h - V.h)`, which keeps the
    /// image's top-left at or above the viewport origin and its bottom-right
    /// at or beyond the viewport's far corner.
    pub fn pan_bounds<S: Scene>(&self, scene: &S) -> SceneResult<Rect> {
        let size = self.current_rect(scene)?.size();
        let viewport = self.config.viewport;
        Ok(Rect::from_origin_size(
            (viewport.width - size.width, viewport.height - size.height),
            (
                2.0 * size.width - viewport.width,
                2.0 * size.height - viewport.height,
            ),
        ))
    }

    /// Start panning. Returns `false` when not zoomed in.
    pub fn begin_drag<S: Scene>(&mut self, scene: &mut S) -> SceneResult<bool> {
        if !self.is_draggable() {
            log::debug!("Image drag ignored at base zoom");
            return Ok(false);
        }
        let rect = self.current_rect(scene)?;
        self.drag = Some(DragOrigin::new(rect, rect.origin()));
        self.set_cursor(scene, Cursor::Move)?;
        Ok(true)
    }

    /// Pan by a gesture delta. Returns `false` when no gesture is active.
    pub fn drag_move<S: Scene>(&mut self, scene: &mut S, delta: Vec2) -> SceneResult<bool> {
        let Some(origin) = self.drag else {
            return Ok(false);
        };
        let bounds = self.pan_bounds(scene)?;
        let target = origin.target(delta, Some(bounds));
        let rect = self.current_rect(scene)?;
        scene.translate(self.node, target - rect.origin())?;
        Ok(true)
    }

    pub fn end_drag<S: Scene>(&mut self, scene: &mut S) -> SceneResult<()> {
        self.drag = None;
        self.set_cursor(scene, Cursor::Default)
    }

    /// Return to base zoom at the original placement.
    pub fn reset<S: Scene>(&mut self, scene: &mut S) -> SceneResult<()> {
        self.zoom = BASE_ZOOM;
        self.drag = None;
        self.set_rect(scene, self.home)
    }

    fn set_cursor<S: Scene>(&self, scene: &mut S, cursor: Cursor) -> SceneResult<()> {
        let style = scene.style(self.node)?.clone().with_cursor(cursor);
        scene.set_style(self.node, style)
    }

    /// Remove the image node.
    pub fn remove<S: Scene>(&self, scene: &mut S) -> SceneResult<()> {
        if scene.contains(self.node) {
            scene.remove(self.node)?;
        }
        Ok(())
    }
}
