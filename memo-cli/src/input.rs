//! Parsing of delimited integer sequences

use memo_cache::MemoError;

/// The sequence offered when a session line is left empty
pub const DEFAULT_INPUT: &str = "3, 6, -2, -5, 7, 3";

/// Parse `text` into a sequence, splitting on `delimiter` and trimming each
/// element.
///
/// Every element must be a complete decimal `i64`. An empty element (for
/// example a trailing delimiter) is rejected. The length requirement of the
/// computation is not checked here.
pub fn parse_sequence(text: &str, delimiter: char) -> Result<Vec<i64>, MemoError> {
    text.split(delimiter)
        .map(str::trim)
        .enumerate()
        .map(|(idx, part)| {
            part.parse::<i64>().map_err(|e| {
                let what = if part.is_empty() {
                    "is empty".to_string()
                } else {
                    format!("'{}' is not an integer ({})", part, e)
                };
                MemoError::InvalidInput(format!("element {} {}", idx + 1, what))
            })
        })
        .collect()
}
