//! Glyph scaling and moment normalization.
//!
//! Moment normalization centers a glyph on its centroid and scales each
//! axis so that four standard deviations span the canvas. The narrower
//! axis gets less room, by a factor that eases out with the aspect ratio,
//! so thin strokes such as 一 are not blown up to fill the square.
//!
//! The arithmetic mirrors the matcher's own normalizer step for step so
//! the generated patterns land exactly where captured strokes do.

use kurbo::Point;

use crate::geom::bounds;

/// Scale every point of every stroke by `factor`.
pub fn scale(strokes: &[Vec<Point>], factor: f64) -> Vec<Vec<Point>> {
    strokes
        .iter()
        .map(|stroke| {
            stroke
                .iter()
                .map(|p| Point::new(p.x * factor, p.y * factor))
                .collect()
        })
        .collect()
}

/// Per-glyph transform derived from the glyph's moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentTransform {
    pub centroid: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl MomentTransform {
    /// Derive the transform for a glyph, or `None` if it has no points.
    pub fn from_strokes(strokes: &[Vec<Point>], canvas: f64) -> Option<Self> {
        let rect = bounds(strokes)?;
        let old_width = rect.width().abs();
        let old_height = rect.height().abs();

        let aspect = aspect_factor(old_width, old_height);
        let (new_width, new_height) = if old_height > old_width {
            (aspect * canvas, canvas)
        } else {
            (canvas, aspect * canvas)
        };
        let offset_x = (canvas - new_width) / 2.0;
        let offset_y = (canvas - new_height) / 2.0;

        let m00 = strokes.iter().map(Vec::len).sum::<usize>() as f64;
        let sum_x = strokes.iter().flatten().fold(0.0, |acc, p| acc + p.x);
        let sum_y = strokes.iter().flatten().fold(0.0, |acc, p| acc + p.y);
        let xc = sum_x / m00;
        let yc = sum_y / m00;

        let mu20 = strokes.iter().flatten().fold(0.0, |acc, p| {
            let d = p.x - xc;
            acc + d * d
        });
        let mu02 = strokes.iter().flatten().fold(0.0, |acc, p| {
            let d = p.y - yc;
            acc + d * d
        });

        Some(Self {
            centroid: Point::new(xc, yc),
            scale_x: axis_scale(new_width, mu20, m00),
            scale_y: axis_scale(new_height, mu02, m00),
            half_width: new_width / 2.0,
            half_height: new_height / 2.0,
            offset_x,
            offset_y,
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.scale_x * (p.x - self.centroid.x) + self.half_width + self.offset_x,
            self.scale_y * (p.y - self.centroid.y) + self.half_height + self.offset_y,
        )
    }
}

/// Moment-normalize a whole glyph onto a `canvas` × `canvas` square.
///
/// One transform is computed from all strokes together and applied to
/// every point. A glyph without points is returned unchanged.
pub fn moment_normalize(strokes: &[Vec<Point>], canvas: f64) -> Vec<Vec<Point>> {
    let Some(transform) = MomentTransform::from_strokes(strokes, canvas) else {
        return strokes.to_vec();
    };
    strokes
        .iter()
        .map(|stroke| stroke.iter().map(|&p| transform.apply(p)).collect())
        .collect()
}

/// `sqrt(sin(π/2 · short/long))`, or 1 for a single-point glyph.
fn aspect_factor(width: f64, height: f64) -> f64 {
    if width == 0.0 && height == 0.0 {
        return 1.0;
    }
    let ratio = if height > width {
        width / height
    } else if width != 0.0 {
        height / width
    } else {
        0.0
    };
    (std::f64::consts::PI / 2.0 * ratio).sin().sqrt()
}

/// Target size over four standard deviations; 0 when the axis has no spread.
fn axis_scale(target: f64, mu: f64, m00: f64) -> f64 {
    let deviation = if mu > 0.0 { (mu / m00).sqrt() } else { 0.0 };
    if deviation > 0.0 {
        target / (4.0 * deviation)
    } else {
        0.0
    }
}
