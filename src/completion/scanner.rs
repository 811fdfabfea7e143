//! Token extraction from a single document

use std::collections::BTreeSet;

use tracing::debug;

use super::pattern::ScanPattern;

/// Collect the distinct tokens of `text` matching `pattern`
///
/// Documents longer than `max_lines` are skipped rather than truncated, so an
/// oversized document always yields an empty set. The scanner keeps no state
/// between calls.
pub fn scan_tokens(text: &str, line_count: usize, pattern: &ScanPattern, max_lines: usize) -> BTreeSet<String> {
    if line_count > max_lines {
        debug!("Skipping document with {} lines (max {})", line_count, max_lines);
        return BTreeSet::new();
    }

    pattern
        .regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
