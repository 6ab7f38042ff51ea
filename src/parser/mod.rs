//! JSONL parser for vaccination catalogs.
//!
//! Pure parsing functions: one JSON object per line, blank lines ignored.

use crate::model::{CatalogError, Vaccination};

/// Parse a single catalog line.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_record(line: &str, line_number: usize) -> Result<Vaccination, CatalogError> {
    serde_json::from_str(line).map_err(|e| CatalogError::Parse {
        line: line_number,
        reason: e.to_string(),
    })
}

/// Parse a whole catalog.
///
/// Fails on the first malformed record; a catalog is served whole or not at all.
pub fn parse_catalog(contents: &str) -> Result<Vec<Vaccination>, CatalogError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_record(line, idx + 1))
        .collect()
}
