//! Locating and reading glyph source files.
//!
//! Sources are KanjiVG-style SVG files named after the glyph's code point
//! in hex (`05b57.svg`). Variant files (`05b57-Kaisho.svg`) are never
//! used. A second directory of hand-made files overrides the first.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PatternError;

/// One glyph's source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSource {
    pub character: char,
    pub path: PathBuf,
}

/// Scan `primary` then `overrides` for glyph files. A later directory
/// wins for the same character; missing directories are ignored.
pub fn collect_sources(
    primary: &Path,
    overrides: Option<&Path>,
) -> Result<BTreeMap<char, PathBuf>, PatternError> {
    let mut files = BTreeMap::new();
    for dir in std::iter::once(primary).chain(overrides) {
        if !dir.is_dir() {
            tracing::debug!("source directory {} not found, skipping", dir.display());
            continue;
        }
        let entries = fs::read_dir(dir).map_err(|e| PatternError::io(dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| PatternError::io(dir, e))?.path();
            if let Some(character) = character_for_file(&path) {
                files.insert(character, path);
            }
        }
    }
    Ok(files)
}

/// The character a file stands for, if its name is `<hex>.svg`.
pub fn character_for_file(path: &Path) -> Option<char> {
    if path.extension()? != "svg" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.contains('-') {
        return None;
    }
    let codepoint = u32::from_str_radix(stem, 16).ok()?;
    char::from_u32(codepoint)
}

/// Restrict `sources` to the requested characters.
///
/// Returns the selected sources in code point order and the requested
/// characters that have no source, also sorted. An empty request selects
/// everything, same as none.
pub fn select(
    sources: BTreeMap<char, PathBuf>,
    requested: Option<&str>,
) -> (Vec<GlyphSource>, Vec<char>) {
    let to_sources = |files: BTreeMap<char, PathBuf>| -> Vec<GlyphSource> {
        files
            .into_iter()
            .map(|(character, path)| GlyphSource { character, path })
            .collect()
    };
    let Some(requested) = requested.filter(|r| !r.is_empty()) else {
        return (to_sources(sources), Vec::new());
    };
    let wanted: BTreeSet<char> = requested.chars().collect();
    let missing: Vec<char> = wanted
        .iter()
        .copied()
        .filter(|c| !sources.contains_key(c))
        .collect();
    let selected: BTreeMap<char, PathBuf> = sources
        .into_iter()
        .filter(|(c, _)| wanted.contains(c))
        .collect();
    (to_sources(selected), missing)
}

/// Comments, CDATA sections and the doctype: markup that holds no elements.
fn inert_markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<!DOCTYPE(?:[^\[>]|\[.*?\])*>")
            .expect("invalid markup regex")
    })
}

fn path_element_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<path\b([^>]*)>").expect("invalid path element regex"))
}

fn d_attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:^|\s)d\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid d attribute regex")
    })
}

/// The `d` attribute of every `<path>` element, in document order.
/// Elements without path data are skipped, as is anything inside
/// comments or CDATA.
pub fn extract_path_data(svg: &str) -> Vec<String> {
    let svg = inert_markup_re().replace_all(svg, "");
    path_element_re()
        .captures_iter(&svg)
        .filter_map(|element| {
            let caps = d_attribute_re().captures(&element[1])?;
            let d = caps.get(1).or_else(|| caps.get(2))?.as_str();
            (!d.trim().is_empty()).then(|| d.to_string())
        })
        .collect()
}

/// Read a source file and return one path string per stroke.
pub fn load_strokes(path: &Path) -> Result<Vec<String>, PatternError> {
    let svg = fs::read_to_string(path).map_err(|e| PatternError::io(path, e))?;
    Ok(extract_path_data(&svg))
}
