//! Word boundary classification and prefix extraction at the cursor
//!
//! This walks backward and forward from the cursor column to find the word
//! fragment being typed. Unlike identifier extraction for a fixed grammar, what
//! counts as a word here is configurable: every character is part of a word
//! unless it is a space, a tab, or one of the configured non-word glyphs.

use super::config::CompletionConfig;

/// Word fragments immediately left and right of the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSplit {
    /// Text between the word start and the cursor (what the user typed)
    pub left: String,
    /// Text between the cursor and the word end (replaced on completion)
    pub right: String,
}

impl PrefixSplit {
    /// The whole word under the cursor, i.e. `left + right`
    pub fn whole_word(&self) -> String {
        format!("{}{}", self.left, self.right)
    }

    /// A prefix worth completing: non-empty and not starting with a digit
    pub fn is_completable(&self) -> bool {
        match self.left.chars().next() {
            Some(first) => !first.is_numeric(),
            None => false,
        }
    }
}

/// Split `line` around `column` (counted in characters)
///
/// Returns `None` when the cursor is at the very start of the line or past its
/// end; there is nothing to complete in either case.
pub fn split_at_cursor(line: &str, column: usize, config: &CompletionConfig) -> Option<PrefixSplit> {
    let chars: Vec<char> = line.chars().collect();
    if column == 0 || column > chars.len() {
        return None;
    }

    let mut start = column;
    while start > 0 && !config.is_boundary(chars[start - 1]) {
        start -= 1;
    }

    let mut end = column;
    while end < chars.len() && !config.is_boundary(chars[end]) {
        end += 1;
    }

    Some(PrefixSplit {
        left: chars[start..column].iter().collect(),
        right: chars[column..end].iter().collect(),
    })
}
