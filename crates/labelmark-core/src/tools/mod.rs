//! Interactive tools driven by pointer clicks.

mod polyline;

pub use polyline::PolylineSession;
