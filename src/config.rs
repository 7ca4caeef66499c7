/// All pattern-generation parameters in one struct.
///
/// The defaults reproduce the matcher's own runtime normalization;
/// changing them yields patterns that no longer compare cleanly against
/// strokes captured by that matcher.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    // -- Sampling stage --
    /// Parameter intervals per curve segment (N intervals → N + 1 samples).
    pub samples_per_segment: usize,

    // -- Scaling stage --
    /// Side length of the source coordinate space (KanjiVG uses 109).
    pub source_size: f64,
    /// Side length of the working canvas the matcher normalizes into.
    pub canvas_size: f64,

    // -- Feature stage --
    /// Arc-length distance between consecutive feature points.
    pub feature_interval: f64,
    /// Fraction of the interval a trailing remainder must exceed for the
    /// stroke's final point to be kept.
    pub tail_ratio: f64,
}

impl PatternConfig {
    /// Factor mapping source coordinates onto the canvas.
    pub fn scale_factor(&self) -> f64 {
        self.canvas_size / self.source_size
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            samples_per_segment: 50,
            source_size: 109.0,
            canvas_size: 256.0,
            feature_interval: 20.0,
            tail_ratio: 0.75,
        }
    }
}
