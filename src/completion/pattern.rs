//! Scan pattern construction
//!
//! Only the first character of the typed prefix is fixed in the pattern. Fuzzy
//! and split matching are not prefix based, so the scan has to return a superset
//! of candidates which the match strategies then narrow down.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::config::{CompletionConfig, DEFAULT_NONWORD_CHARS};

/// Compiled token pattern for one request
#[derive(Debug, Clone)]
pub struct ScanPattern {
    regex: Regex,
}

impl ScanPattern {
    /// Build the pattern for prefix `left`
    ///
    /// The pattern matches an optional `$` sigil, a word boundary, the first
    /// character of `left`, and then at least `max(1, min_len - 1)` word
    /// characters, so every token is at least `min_len` long. Word characters
    /// are `\w` plus every default non-word glyph the configuration does not
    /// treat as a boundary.
    ///
    /// Returns `None` for an empty prefix.
    pub fn build(left: &str, config: &CompletionConfig) -> Option<Self> {
        let first = left.chars().next()?;
        let source = pattern_source(first, config);
        debug!("Scan pattern for {:?}: {}", left, source);

        match RegexBuilder::new(&source)
            .case_insensitive(!config.case_sensitive)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                warn!("Failed to compile scan pattern {:?}: {}", source, e);
                None
            }
        }
    }

    /// The underlying compiled regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The pattern source, mostly useful for logging and tests
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn pattern_source(first: char, config: &CompletionConfig) -> String {
    let mut word_class = String::from(r"\w");
    for ch in DEFAULT_NONWORD_CHARS.chars() {
        if !config.nonword_chars.contains(ch) {
            word_class.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
        }
    }

    let repeats = config.min_len.saturating_sub(1).max(1);
    format!(
        r"\$?\b{}[{}]{{{},}}",
        regex::escape(first.encode_utf8(&mut [0; 4])),
        word_class,
        repeats
    )
}
