//! kvg2ref: KanjiVG stroke outlines → reference patterns for stroke matching.
//!
//! Turns per-stroke SVG path data into short sequences of feature points
//! on a 256 × 256 canvas, normalized exactly the way a stroke matcher
//! normalizes the strokes it captures at runtime, so both can be compared
//! point by point.
//!
//! # Example
//!
//! ```
//! use kvg2ref::{process_glyph, PatternConfig};
//!
//! let strokes = vec!["M20,54.5L89,54.5".to_string()];
//! let entry = process_glyph('一', &strokes, &PatternConfig::default())?;
//! assert_eq!(entry.stroke_count, 1);
//! assert!(entry.strokes[0].len() >= 2);
//! # Ok::<(), kvg2ref::PatternError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod batch;
pub mod coverage;
pub mod error;
pub mod features;
pub mod normalize;
pub mod path;
pub mod sample;
pub mod source;
pub mod table;

// Re-export kurbo so downstream users get the same `Point` type
// used by FeatureEntry.strokes.
pub use kurbo;

pub use batch::{run_batch, BatchReport};
pub use config::PatternConfig;
pub use error::PatternError;
pub use source::GlyphSource;

use kurbo::{CubicBez, Point};

/// One glyph's reference pattern: the table's unit of output.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntry {
    pub character: char,
    /// Always `strokes.len()`; the table format stores it explicitly.
    pub stroke_count: usize,
    /// Feature points per stroke, in writing order.
    pub strokes: Vec<Vec<Point>>,
}

impl FeatureEntry {
    pub fn new(character: char, strokes: Vec<Vec<Point>>) -> Self {
        Self {
            character,
            stroke_count: strokes.len(),
            strokes,
        }
    }
}

/// Full pipeline for one glyph: path data per stroke → feature entry.
///
/// Pipeline: parse to cubics, sample densely, scale into canvas space,
/// moment-normalize the whole glyph, resample at a fixed interval.
/// Strokes whose path data yields no segments are dropped; a glyph left
/// with none is `PatternError::NoStrokes`.
pub fn process_glyph(
    character: char,
    path_data: &[String],
    config: &PatternConfig,
) -> Result<FeatureEntry, PatternError> {
    // ── Parse ─────────────────────────────────────────────
    let outlines: Vec<Vec<CubicBez>> = path_data
        .iter()
        .map(|d| path::parse(d))
        .filter(|segments| !segments.is_empty())
        .collect();
    if outlines.is_empty() {
        return Err(PatternError::NoStrokes);
    }

    // ── Sample & scale ────────────────────────────────────
    let dense: Vec<Vec<Point>> = outlines
        .iter()
        .map(|segments| sample::sample_stroke(segments, config.samples_per_segment))
        .collect();
    let scaled = normalize::scale(&dense, config.scale_factor());

    // ── Normalize ─────────────────────────────────────────
    let normalized = normalize::moment_normalize(&scaled, config.canvas_size);

    // ── Features ──────────────────────────────────────────
    let strokes = features::extract(&normalized, config.feature_interval, config.tail_ratio)?;
    if let Some(stroke) = strokes
        .iter()
        .position(|s| s.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()))
    {
        return Err(PatternError::NonFinite { stroke });
    }

    let points: usize = strokes.iter().map(Vec::len).sum();
    tracing::debug!(
        "{} (U+{:04X}): {} strokes, {} dense → {} feature points",
        character,
        character as u32,
        strokes.len(),
        dense.iter().map(Vec::len).sum::<usize>(),
        points,
    );

    Ok(FeatureEntry::new(character, strokes))
}

/// Read a glyph's source file and run it through `process_glyph`.
pub fn process_source(
    glyph: &GlyphSource,
    config: &PatternConfig,
) -> Result<FeatureEntry, PatternError> {
    let path_data = source::load_strokes(&glyph.path)?;
    process_glyph(glyph.character, &path_data, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(a: Point, b: Point) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn diagonal_across_source_canvas() {
        let strokes = ["M0,0L109,109".to_string()];
        let entry = process_glyph('\\', &strokes, &PatternConfig::default()).unwrap();
        assert_eq!(entry.stroke_count, 1);
        let stroke = &entry.strokes[0];
        let first = stroke[0];
        let last = *stroke.last().unwrap();

        // A two-point line: centroid in the middle, sigma = half the extent,
        // so the ends land one quarter of the canvas from the center.
        assert!((first.x - 64.0).abs() < 1e-9 && (first.y - 64.0).abs() < 1e-9, "{first:?}");
        assert!((last.x - 192.0).abs() < 1e-9 && (last.y - 192.0).abs() < 1e-9, "{last:?}");
        // Mirrored around the canvas center.
        assert!((first.x + last.x - 256.0).abs() < 1e-9);
        assert!((first.y + last.y - 256.0).abs() < 1e-9);

        // A line sampled only at its ends has no interior points.
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn curved_diagonal_spacing() {
        // Same diagonal drawn as a true cubic, so it is sampled densely.
        let d = "M0,0C36.33,36.33 72.67,72.67 109,109".to_string();
        let config = PatternConfig::default();
        let entry = process_glyph('x', &[d.clone()], &config).unwrap();
        let stroke = &entry.strokes[0];

        // Arc length of the normalized dense stroke the features come from.
        let dense = vec![sample::sample_stroke(&path::parse(&d), config.samples_per_segment)];
        let scaled = normalize::scale(&dense, config.scale_factor());
        let normalized = normalize::moment_normalize(&scaled, config.canvas_size);
        let length: f64 = normalized[0].windows(2).map(|w| dist(w[0], w[1])).sum();
        let expected = length / config.feature_interval;
        assert!(
            (stroke.len() as f64 - expected).abs() <= 1.0,
            "{} points for length {length}",
            stroke.len()
        );
        // Gaps are whole numbers of dense steps (about 6 units here), so
        // each one is within a step of the interval.
        for pair in stroke.windows(2).take(stroke.len() - 2) {
            let gap = dist(pair[0], pair[1]);
            assert!((gap - 20.0).abs() < 7.0, "gap {gap}");
        }
    }

    #[test]
    fn empty_path_is_no_strokes() {
        let err = process_glyph('空', &["".to_string()], &PatternConfig::default()).unwrap_err();
        assert!(err.is_skip());
        let err = process_glyph('空', &[], &PatternConfig::default()).unwrap_err();
        assert!(matches!(err, PatternError::NoStrokes));
    }

    #[test]
    fn unusable_strokes_are_dropped() {
        let strokes = vec![
            "M10,10".to_string(),
            "M10,20L90,20".to_string(),
            "Q1,2 3,4".to_string(),
        ];
        let entry = process_glyph('一', &strokes, &PatternConfig::default()).unwrap();
        assert_eq!(entry.stroke_count, 1);
    }

    #[test]
    fn overflowing_coordinates_are_an_error() {
        let strokes = vec!["M0,0C1e308,1e308 -1e308,5 1e308,-1e308".to_string()];
        let err = process_glyph('x', &strokes, &PatternConfig::default()).unwrap_err();
        assert!(matches!(err, PatternError::NonFinite { stroke: 0 }));
    }

    #[test]
    fn every_stroke_has_two_features() {
        let strokes = vec![
            "M31.5,24.5c1.12,0.25,2.75,0.38,4.5,0.25c12.25-0.88,38.13-3.38,53.5-3.5".to_string(),
            "M54.5,25.5c0.5,1,0.5,2,0.5,3".to_string(),
            "M20,90.5L89,90.5".to_string(),
        ];
        let entry = process_glyph('工', &strokes, &PatternConfig::default()).unwrap();
        assert_eq!(entry.stroke_count, 3);
        assert!(entry.strokes.iter().all(|s| s.len() >= 2));
    }
}
