//! Fixed-interval feature point extraction.

use kurbo::Point;

use crate::error::PatternError;
use crate::geom::distance;

/// Resample one normalized stroke to points roughly `interval` apart
/// along its arc length.
///
/// The first point is always kept. A point is emitted each time the
/// accumulated length reaches the interval (the interval is subtracted,
/// the remainder carries over), but never at the second point, so a short
/// leading segment cannot produce a near-duplicate of the start. The last
/// point is appended when it would otherwise be the only feature, or when
/// the leftover length exceeds `tail_ratio * interval`.
pub fn extract_stroke(
    stroke: &[Point],
    interval: f64,
    tail_ratio: f64,
) -> Option<Vec<Point>> {
    let (&first, &last) = (stroke.first()?, stroke.last()?);
    let mut features = vec![first];
    let mut accum = 0.0;
    for i in 1..stroke.len() {
        accum += distance(stroke[i - 1], stroke[i]);
        if accum >= interval && i > 1 {
            accum -= interval;
            features.push(stroke[i]);
        }
    }
    if features.len() == 1 || accum > tail_ratio * interval {
        features.push(last);
    }
    Some(features)
}

/// Extract features for every stroke of a glyph.
pub fn extract(
    strokes: &[Vec<Point>],
    interval: f64,
    tail_ratio: f64,
) -> Result<Vec<Vec<Point>>, PatternError> {
    strokes
        .iter()
        .enumerate()
        .map(|(i, stroke)| {
            extract_stroke(stroke, interval, tail_ratio).ok_or(PatternError::EmptyStroke(i))
        })
        .collect()
}
