use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building reference patterns.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PatternError {
    #[error("no strokes found")]
    NoStrokes,

    #[error("stroke {0} has no points")]
    EmptyStroke(usize),

    #[error("non-finite coordinate in stroke {stroke} after normalization")]
    NonFinite { stroke: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pattern table: {0}")]
    TableFormat(String),

    #[error("invalid pattern table entry: {0}")]
    TableJson(#[from] serde_json::Error),
}

impl PatternError {
    /// True for glyphs that are skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, PatternError::NoStrokes)
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatternError::Io {
            path: path.into(),
            source,
        }
    }
}
