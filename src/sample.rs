//! Dense polyline sampling of a stroke's cubic segments.

use kurbo::{CubicBez, Point};

use crate::geom::{cubic_point, is_line};

/// Sample a stroke into a dense polyline.
///
/// Lines contribute only their end point; curves are evaluated at
/// `samples + 1` evenly spaced parameters. A segment's start point is
/// skipped whenever the polyline already has a point, since it is the
/// previous segment's end.
pub fn sample_stroke(segments: &[CubicBez], samples: usize) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::new();
    for seg in segments {
        if is_line(seg) {
            if points.is_empty() {
                points.push(seg.p0);
            }
            points.push(seg.p3);
            continue;
        }
        for i in 0..=samples {
            if i == 0 && !points.is_empty() {
                continue;
            }
            let t = i as f64 / samples as f64;
            points.push(cubic_point(seg, t));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_emit_only_endpoints() {
        let segs = [
            CubicBez::new((0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0)),
            CubicBez::new((10.0, 0.0), (10.0, 0.0), (10.0, 10.0), (10.0, 10.0)),
        ];
        let pts = sample_stroke(&segs, 50);
        assert_eq!(
            pts,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn curve_sample_count() {
        let curve = CubicBez::new((0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (5.0, 0.0));
        let pts = sample_stroke(&[curve], 50);
        assert_eq!(pts.len(), 51);
        assert_eq!(pts[0], curve.p0);
        assert_eq!(pts[50], curve.p3);

        // A second curve shares its start point with the first one's end.
        let next = CubicBez::new((5.0, 0.0), (5.0, -5.0), (10.0, -5.0), (10.0, 0.0));
        let pts = sample_stroke(&[curve, next], 50);
        assert_eq!(pts.len(), 101);
        assert_eq!(pts[100], next.p3);
    }

    #[test]
    fn line_after_curve_adds_one_point() {
        let curve = CubicBez::new((0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (5.0, 0.0));
        let line = CubicBez::new((5.0, 0.0), (5.0, 0.0), (9.0, 0.0), (9.0, 0.0));
        let pts = sample_stroke(&[curve, line], 10);
        assert_eq!(pts.len(), 12);
        assert_eq!(pts.last(), Some(&Point::new(9.0, 0.0)));
    }

    #[test]
    fn empty_stroke() {
        assert!(sample_stroke(&[], 50).is_empty());
    }
}
