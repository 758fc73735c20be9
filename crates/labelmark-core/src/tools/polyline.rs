//! Click-to-draw polyline tool.

use crate::error::SceneResult;
use crate::options::PolylineStyle;
use crate::path::PathData;
use crate::scene::{NodeId, Primitive, Scene, Style};
use kurbo::{BezPath, Point};

/// One polyline drawing session.
///
/// Every click appends a vertex; from the second click on, a segment joins
/// the previous vertex to the new one. Each vertex gets a circular marker,
/// and markers always stay on top of the segments drawn before them.
#[derive(Debug, Clone, Default)]
pub struct PolylineSession {
    history: Vec<Point>,
    segments: Vec<NodeId>,
    markers: Vec<NodeId>,
    style: PolylineStyle,
    enabled: bool,
}

impl PolylineSession {
    /// Create a disabled session.
    pub fn new(style: PolylineStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &PolylineStyle {
        &self.style
    }

    /// Begin accepting clicks.
    pub fn start(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting clicks. What was drawn stays.
    pub fn stop(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Clicked points, oldest first.
    pub fn history(&self) -> &[Point] {
        &self.history
    }

    pub fn segments(&self) -> &[NodeId] {
        &self.segments
    }

    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    /// Record a click at `point`.
    ///
    /// Returns `Ok(false)` if the session is disabled.
    pub fn click<S: Scene>(&mut self, scene: &mut S, point: Point) -> SceneResult<bool> {
        if !self.enabled {
            log::debug!("Polyline click at ({}, {}) ignored, tool disabled", point.x, point.y);
            return Ok(false);
        }

        self.history.push(point);

        if let [.., from, to] = self.history[..] {
            let segment = scene.insert(
                Primitive::Path(PathData::polyline(&[from, to])),
                Style::stroked(self.style.segment_color, self.style.segment_width),
            );
            self.segments.push(segment);

            if let Some(&previous) = self.markers.last() {
                match (scene.z_index(previous), scene.z_index(segment)) {
                    (Some(p), Some(s)) if p < s => scene.to_front(previous)?,
                    (None, _) => log::warn!("Polyline marker {previous} is gone from the scene"),
                    _ => {}
                }
            }
        }

        let marker = scene.insert(
            Primitive::Circle {
                center: point,
                radius: self.style.marker_radius,
            },
            Style::filled(self.style.marker_color),
        );
        self.markers.push(marker);
        Ok(true)
    }

    /// The whole polyline through every recorded point.
    pub fn to_path(&self) -> BezPath {
        PathData::polyline(&self.history).to_bez_path()
    }

    /// Remove every segment and marker and forget the history.
    pub fn reset<S: Scene>(&mut self, scene: &mut S) -> SceneResult<()> {
        for node in self.segments.drain(..).chain(self.markers.drain(..)) {
            if scene.contains(node) {
                scene.remove(node)?;
            }
        }
        self.history.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RetainedScene;

    fn started() -> PolylineSession {
        let mut session = PolylineSession::new(PolylineStyle::default());
        session.start();
        session
    }

    #[test]
    fn test_three_clicks() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        for p in [(1.0, 1.0), (5.0, 1.0), (5.0, 5.0)] {
            assert!(session.click(&mut scene, Point::new(p.0, p.1)).unwrap());
        }

        assert_eq!(session.history().len(), 3);
        assert_eq!(session.segments().len(), 2);
        assert_eq!(session.markers().len(), 3);

        let second = scene.primitive(session.segments()[1]).unwrap();
        assert_eq!(
            second,
            &Primitive::Path(PathData::polyline(&[Point::new(5.0, 1.0), Point::new(5.0, 5.0)]))
        );
    }

    #[test]
    fn test_single_click_adds_marker_only() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        session.click(&mut scene, Point::new(3.0, 4.0)).unwrap();
        assert!(session.segments().is_empty());
        assert_eq!(session.markers().len(), 1);
        assert_eq!(
            scene.primitive(session.markers()[0]).unwrap(),
            &Primitive::Circle {
                center: Point::new(3.0, 4.0),
                radius: 10.0
            }
        );
    }

    #[test]
    fn test_markers_above_earlier_segments() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        for i in 0..8 {
            let x = i as f64 * 7.0;
            session.click(&mut scene, Point::new(x, (i % 3) as f64 * 11.0)).unwrap();

            for (n, &marker) in session.markers().iter().enumerate() {
                let marker_z = scene.z_index(marker).unwrap();
                for &segment in &session.segments()[..n.min(session.segments().len())] {
                    assert!(scene.z_index(segment).unwrap() < marker_z);
                }
            }
        }
        // every marker sits above the segment that ends at it
        for (n, &segment) in session.segments().iter().enumerate() {
            let segment_z = scene.z_index(segment).unwrap();
            assert!(scene.z_index(session.markers()[n]).unwrap() > segment_z);
            assert!(scene.z_index(session.markers()[n + 1]).unwrap() > segment_z);
        }
    }

    #[test]
    fn test_click_after_marker_removed() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        session.click(&mut scene, Point::new(1.0, 1.0)).unwrap();
        let marker = session.markers()[0];
        scene.remove(marker).unwrap();

        assert!(session.click(&mut scene, Point::new(5.0, 1.0)).unwrap());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.segments().len(), 1);
        assert_eq!(session.markers().len(), 2);
        let segment_z = scene.z_index(session.segments()[0]).unwrap();
        assert!(scene.z_index(session.markers()[1]).unwrap() > segment_z);
    }

    #[test]
    fn test_disabled_clicks_ignored() {
        let mut scene = RetainedScene::new();
        let mut session = PolylineSession::new(PolylineStyle::default());
        assert!(!session.click(&mut scene, Point::new(1.0, 1.0)).unwrap());
        assert!(session.history().is_empty());
        assert!(scene.is_empty());

        session.start();
        session.click(&mut scene, Point::new(1.0, 1.0)).unwrap();
        session.stop();
        session.click(&mut scene, Point::new(2.0, 2.0)).unwrap();
        assert_eq!(session.history(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_clicks_outside_canvas_accepted() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        session.click(&mut scene, Point::new(-50.0, 9000.0)).unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_reset_clears_nodes_and_history() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        session.click(&mut scene, Point::new(1.0, 1.0)).unwrap();
        session.click(&mut scene, Point::new(2.0, 2.0)).unwrap();
        session.reset(&mut scene).unwrap();

        assert!(scene.is_empty());
        assert!(session.history().is_empty());
        assert!(session.is_enabled());

        session.click(&mut scene, Point::new(9.0, 9.0)).unwrap();
        assert!(session.segments().is_empty());
    }

    #[test]
    fn test_to_path() {
        let mut scene = RetainedScene::new();
        let mut session = started();
        assert!(session.to_path().elements().is_empty());
        session.click(&mut scene, Point::new(1.0, 1.0)).unwrap();
        session.click(&mut scene, Point::new(5.0, 1.0)).unwrap();
        assert_eq!(session.to_path().elements().len(), 2);
    }
}
