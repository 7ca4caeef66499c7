//! Shared geometry utilities.
//!
//! Evaluation order must match the matcher's arithmetic exactly, so these
//! do not go through kurbo's `eval` (different factoring) or `distance`
//! (`hypot`).

use kurbo::{CubicBez, Point, Rect};

/// A line promoted to a cubic has its handles on its endpoints.
pub fn is_line(seg: &CubicBez) -> bool {
    seg.p0 == seg.p1 && seg.p2 == seg.p3
}

/// Evaluate a cubic bezier at parameter `t` in Bernstein form.
pub fn cubic_point(seg: &CubicBez, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * seg.p0.x + b1 * seg.p1.x + b2 * seg.p2.x + b3 * seg.p3.x,
        b0 * seg.p0.y + b1 * seg.p1.y + b2 * seg.p2.y + b3 * seg.p3.y,
    )
}

/// Euclidean distance as `sqrt(dx² + dy²)`.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Bounding box of every point of every stroke, or `None` if there are
/// no points at all.
pub fn bounds(strokes: &[Vec<Point>]) -> Option<Rect> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;
    for p in strokes.iter().flatten() {
        any = true;
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    any.then(|| Rect::new(min_x, min_y, max_x, max_y))
}
