//! Path data and the arrow path builder.

use crate::geometry::rotate_point;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// A single path command in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ClosePath,
}

/// An ordered list of path commands.
///
/// Displays as SVG path text (`M 0 0 L 10 0 Z`), which is what the scene
/// hands to the rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData(Vec<PathCommand>);

impl PathData {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open path through `points` in order.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Closed polygon through `points` in order.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        if !path.0.is_empty() {
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, p: Point) {
        self.0.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.0.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.0.push(PathCommand::ClosePath);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the path ends with a close command.
    pub fn is_closed(&self) -> bool {
        matches!(self.0.last(), Some(PathCommand::ClosePath))
    }

    /// All vertices of the path, in command order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().filter_map(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::ClosePath => None,
        })
    }

    /// Axis-aligned bounds of all vertices (zero rect for an empty path).
    pub fn bounds(&self) -> Rect {
        let mut points = self.points();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p))
    }

    /// Offset every vertex by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for cmd in &mut self.0 {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => *p += delta,
                PathCommand::ClosePath => {}
            }
        }
    }

    /// Convert to a kurbo path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for cmd in &self.0 {
            match cmd {
                PathCommand::MoveTo(p) => path.move_to(*p),
                PathCommand::LineTo(p) => path.line_to(*p),
                PathCommand::ClosePath => path.close_path(),
            }
        }
        path
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::ClosePath => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Arrowhead dimensions, fixed when an arrow is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadSize {
    /// Half-width of the head, measured perpendicular to the shaft.
    pub width: f64,
    /// Length of the head along the shaft.
    pub height: f64,
}

impl HeadSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Derived path data for an arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowPaths {
    /// Shaft from the base to the back of the head.
    pub line: PathData,
    /// Closed triangle at the tip.
    pub head: PathData,
    pub start: Point,
    pub end: Point,
    pub size: HeadSize,
}

/// Build shaft and head paths for an arrow from `start` (base) to `end` (tip).
///
/// The head template points along +x with its tip at `end` and is rotated
/// about the tip onto the shaft direction. The shaft stops at the back of the
/// head so the two never overlap. Coincident endpoints give `atan2(0, 0) = 0`
/// and render as a bare head at the shared point.
pub fn build_arrow_paths(start: Point, end: Point, size: HeadSize) -> ArrowPaths {
    if start == end || size.width <= 0.0 || size.height <= 0.0 {
        log::debug!(
            "Degenerate arrow geometry: start={:?} end={:?} size={:?}",
            start,
            end,
            size
        );
    }

    let angle = (start.x - end.x).atan2(end.y - start.y) + FRAC_PI_2;
    let back_x = end.x - size.height;
    let [back, back_left, back_right, tip] = [
        Point::new(back_x, end.y),
        Point::new(back_x, end.y - size.width),
        Point::new(back_x, end.y + size.width),
        end,
    ]
    .map(|p| rotate_point(p, end, angle));

    ArrowPaths {
        line: PathData::polyline(&[start, back]),
        head: PathData::polygon(&[tip, back_left, back_right]),
        start,
        end,
        size,
    }
}
