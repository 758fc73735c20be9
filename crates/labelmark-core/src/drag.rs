//! Bounded dragging shared by labels, arrowheads and the background image.

use kurbo::{Point, Rect, Vec2};

/// Clamp a drag delta so the dragged box stays inside `bounds`.
///
/// Each axis is checked on its own against the box captured at gesture
/// start. An axis whose proposed position would leave `bounds` has its delta
/// rejected outright (it becomes `0`), so the object returns to its
/// drag-origin position on that axis instead of sliding along the edge.
/// Without bounds the delta passes through unchanged.
pub fn clamp_delta(origin_box: Rect, delta: Vec2, bounds: Option<Rect>) -> Vec2 {
    let Some(bounds) = bounds else {
        return delta;
    };

    let allowed = |origin: f64, d: f64, lo: f64, span: f64, extent: f64| {
        let proposed = origin + d;
        if proposed < lo || proposed > lo + span - extent {
            0.0
        } else {
            d
        }
    };

    Vec2::new(
        allowed(origin_box.x0, delta.x, bounds.x0, bounds.width(), origin_box.width()),
        allowed(origin_box.y0, delta.y, bounds.y0, bounds.height(), origin_box.height()),
    )
}

/// Scratch values captured when a drag gesture starts.
///
/// Owned by whichever entity is being dragged and dropped on drag-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Bounding box of the dragged part at gesture start.
    pub bbox: Rect,
    /// Position the gesture moves (an endpoint or a box corner).
    pub anchor: Point,
}

impl DragOrigin {
    pub fn new(bbox: Rect, anchor: Point) -> Self {
        Self { bbox, anchor }
    }

    /// Anchor position for a gesture delta, after bounds rejection.
    pub fn target(&self, delta: Vec2, bounds: Option<Rect>) -> Point {
        self.anchor + clamp_delta(self.bbox, delta, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Rect {
        Rect::from_origin_size((0.0, 0.0), (10.0, 10.0))
    }

    fn bounds() -> Option<Rect> {
        Some(Rect::from_origin_size((0.0, 0.0), (20.0, 20.0)))
    }

    #[test]
    fn test_rejects_past_right_edge() {
        let d = clamp_delta(square(), Vec2::new(15.0, 0.0), bounds());
        assert_eq!(d.x, 0.0);
    }

    #[test]
    fn test_passes_within_range() {
        let d = clamp_delta(square(), Vec2::new(5.0, 0.0), bounds());
        assert_eq!(d.x, 5.0);
    }

    #[test]
    fn test_exact_edge_is_allowed() {
        let d = clamp_delta(square(), Vec2::new(10.0, 10.0), bounds());
        assert_eq!(d, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_axes_are_independent() {
        let d = clamp_delta(square(), Vec2::new(4.0, -1.0), bounds());
        assert_eq!(d, Vec2::new(4.0, 0.0));

        let d = clamp_delta(square(), Vec2::new(-0.5, 9.0), bounds());
        assert_eq!(d, Vec2::new(0.0, 9.0));
    }

    #[test]
    fn test_no_bounds_passes_through() {
        let d = clamp_delta(square(), Vec2::new(500.0, -500.0), None);
        assert_eq!(d, Vec2::new(500.0, -500.0));
    }

    #[test]
    fn test_offset_bounds() {
        let origin = Rect::from_origin_size((110.0, 60.0), (30.0, 20.0));
        let bounds = Some(Rect::from_origin_size((100.0, 50.0), (50.0, 50.0)));
        assert_eq!(clamp_delta(origin, Vec2::new(-10.0, 20.0), bounds), Vec2::new(-10.0, 20.0));
        assert_eq!(clamp_delta(origin, Vec2::new(-11.0, 21.0), bounds), Vec2::ZERO);
    }

    #[test]
    fn test_origin_target_snaps_back() {
        let origin = DragOrigin::new(square(), Point::new(5.0, 5.0));
        assert_eq!(origin.target(Vec2::new(3.0, 3.0), bounds()), Point::new(8.0, 8.0));
        assert_eq!(origin.target(Vec2::new(30.0, 3.0), bounds()), Point::new(5.0, 8.0));
    }
}
