//! The `ref-patterns.js` table the matcher loads.
//!
//! ```text
//! // header comments
//! KanjiCanvas.refPatterns = [
//! ["一",1,[[[x, y], [x, y]]]],
//! ...
//! ];
//! ```
//!
//! Each entry line is also valid JSON, which is how the table is read back.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use kurbo::Point;
use serde::Deserialize;

use crate::error::PatternError;
use crate::FeatureEntry;

const HEADER: &[&str] = &[
    "// Generated from KanjiVG (CC BY-SA 3.0, Ulrich Apel) + custom stroke data",
    "// https://github.com/KanjiVG/kanjivg",
    "// Do not edit; regenerate with: kvg2ref generate",
];

const OPEN: &str = "KanjiCanvas.refPatterns = [";
const CLOSE: &str = "];";

/// Escape a character for a double-quoted JavaScript string literal.
pub fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '"' => "\\\"".to_string(),
        _ => c.to_string(),
    }
}

/// Format one entry as `["c",n,[[[x, y], ...], ...]]`.
///
/// Coordinates use the shortest representation that reads back to the
/// same `f64`.
pub fn format_entry(entry: &FeatureEntry) -> String {
    let mut out = String::new();
    let _ = write!(out, "[\"{}\",{},[", escape_char(entry.character), entry.stroke_count);
    for (i, stroke) in entry.strokes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('[');
        for (j, p) in stroke.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "[{}, {}]", p.x, p.y);
        }
        out.push(']');
    }
    out.push_str("]]");
    out
}

/// Write the whole table.
pub fn write_table<W: Write>(writer: &mut W, entries: &[FeatureEntry]) -> io::Result<()> {
    for line in HEADER {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{OPEN}")?;
    for (i, entry) in entries.iter().enumerate() {
        let comma = if i + 1 < entries.len() { "," } else { "" };
        writeln!(writer, "{}{}", format_entry(entry), comma)?;
    }
    writeln!(writer, "{CLOSE}")
}

/// Write the table to `path`, creating parent directories.
pub fn write_table_file(path: &Path, entries: &[FeatureEntry]) -> Result<(), PatternError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PatternError::io(parent, e))?;
    }
    let mut buf = Vec::new();
    write_table(&mut buf, entries).map_err(|e| PatternError::io(path, e))?;
    fs::write(path, buf).map_err(|e| PatternError::io(path, e))
}

/// An entry as written: `["c", n, [[[x, y], ...], ...]]`.
#[derive(Deserialize)]
struct RawEntry(String, usize, Vec<Vec<[f64; 2]>>);

/// Parse a table produced by `write_table`.
pub fn read_table(text: &str) -> Result<Vec<FeatureEntry>, PatternError> {
    let start = text
        .find(OPEN)
        .ok_or_else(|| PatternError::TableFormat("missing table assignment".into()))?;
    // Keep the array's own brackets: from '[' up to the closing "];".
    let body_start = start + OPEN.len() - 1;
    let body_end = text[body_start..]
        .rfind(CLOSE)
        .map(|i| body_start + i + 1)
        .ok_or_else(|| PatternError::TableFormat("unterminated table".into()))?;

    let raw: Vec<RawEntry> = serde_json::from_str(&text[body_start..body_end])?;
    raw.into_iter().map(entry_from_raw).collect()
}

/// Read and parse a table file.
pub fn read_table_file(path: &Path) -> Result<Vec<FeatureEntry>, PatternError> {
    let text = fs::read_to_string(path).map_err(|e| PatternError::io(path, e))?;
    read_table(&text)
}

fn entry_from_raw(raw: RawEntry) -> Result<FeatureEntry, PatternError> {
    let RawEntry(id, stroke_count, strokes) = raw;
    let mut chars = id.chars();
    let (Some(character), None) = (chars.next(), chars.next()) else {
        return Err(PatternError::TableFormat(format!("{id:?} is not a single character")));
    };
    if stroke_count != strokes.len() {
        return Err(PatternError::TableFormat(format!(
            "{character}: stroke count {stroke_count} but {} strokes",
            strokes.len()
        )));
    }
    let strokes = strokes
        .into_iter()
        .map(|stroke| stroke.into_iter().map(|[x, y]| Point::new(x, y)).collect())
        .collect();
    Ok(FeatureEntry {
        character,
        stroke_count,
        strokes,
    })
}
