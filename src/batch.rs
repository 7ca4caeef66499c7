//! Parallel batch generation over many glyphs.

use rayon::prelude::*;

use crate::config::PatternConfig;
use crate::error::PatternError;
use crate::source::GlyphSource;
use crate::{process_source, FeatureEntry};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully processed glyphs in code point order.
    pub entries: Vec<FeatureEntry>,
    /// Glyphs whose source had no usable strokes.
    pub skipped: Vec<char>,
    /// Glyphs that failed, with the cause.
    pub errors: Vec<(char, PatternError)>,
}

impl BatchReport {
    /// Skips and errors together.
    pub fn failed(&self) -> usize {
        self.skipped.len() + self.errors.len()
    }
}

/// Process every source in parallel.
///
/// Glyphs are independent, so a failure only drops that glyph. Results
/// are ordered by code point regardless of completion order.
pub fn run_batch(sources: &[GlyphSource], config: &PatternConfig) -> BatchReport {
    let outcomes: Vec<(char, Result<FeatureEntry, PatternError>)> = sources
        .par_iter()
        .map(|source| (source.character, process_source(source, config)))
        .collect();
    collect_outcomes(outcomes)
}

/// Sort per-glyph outcomes into a report.
pub fn collect_outcomes(
    outcomes: impl IntoIterator<Item = (char, Result<FeatureEntry, PatternError>)>,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (character, outcome) in outcomes {
        match outcome {
            Ok(entry) => report.entries.push(entry),
            Err(e) if e.is_skip() => {
                tracing::warn!("skipped {} (U+{:04X}): {}", character, character as u32, e);
                report.skipped.push(character);
            }
            Err(e) => {
                tracing::warn!(
                    "error processing {} (U+{:04X}): {}",
                    character,
                    character as u32,
                    e
                );
                report.errors.push((character, e));
            }
        }
    }
    report.entries.sort_by_key(|entry| entry.character);
    report.skipped.sort_unstable();
    report.errors.sort_by_key(|(character, _)| *character);
    report
}
