//! Geometry kernel: point rotation, box centroids and canvas fitting.

use kurbo::{Point, Rect, Size};

/// Rotate `point` about `center` by `rad` radians.
///
/// Uses the standard 2D rotation matrix, so positive angles turn clockwise
/// on a y-down canvas.
pub fn rotate_point(point: Point, center: Point, rad: f64) -> Point {
    let (sin, cos) = rad.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(cos * dx - sin * dy + center.x, sin * dx + cos * dy + center.y)
}

/// Geometric center of a bounding box.
pub fn centroid(rect: Rect) -> Point {
    Point::new(rect.x0 + rect.width() / 2.0, rect.y0 + rect.height() / 2.0)
}

/// Expand `size` to fit within `max`, preserving the aspect ratio.
///
/// The longer side fills the canvas and the shorter one is rounded to whole
/// pixels. Square images take the whole canvas.
pub fn fit_to_canvas(size: Size, max: Size) -> Size {
    if size.width > size.height {
        Size::new(max.width, (size.height * max.width / size.width).round())
    } else if size.width < size.height {
        Size::new((size.width * max.height / size.height).round(), max.height)
    } else {
        max
    }
}
