//! Match strategies deciding whether a candidate fits the typed prefix
//!
//! Four strategies are available:
//! - **Plain**: the candidate starts with the prefix
//! - **Fuzzy**: the prefix is a subsequence of the candidate (case ignored)
//! - **Case split**: the prefix gives CamelCase initials (`PLF` for `PropLexerFile`)
//! - **Underscore split**: the prefix gives snake_case initials or segment
//!   prefixes (`plf` or `prolex` for `prop_lexer_file`)
//!
//! [`Matcher`] chains them the way the configuration asks for. Fuzzy, when
//! enabled, supersedes everything else since it accepts a superset of what the
//! split strategies accept.

use super::config::CompletionConfig;

/// Plain prefix test
pub fn is_plain_match(candidate: &str, prefix: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        candidate.starts_with(prefix)
    } else {
        candidate.to_uppercase().starts_with(&prefix.to_uppercase())
    }
}

/// Fuzzy test: every prefix character occurs in the candidate, in order
///
/// Both sides are uppercased first, so this is always case insensitive.
pub fn is_fuzzy_match(candidate: &str, prefix: &str) -> bool {
    let candidate = candidate.to_uppercase();
    let mut rest = candidate.chars();
    prefix
        .to_uppercase()
        .chars()
        .all(|wanted| rest.any(|ch| ch == wanted))
}

/// Split at uppercase letters; the first character always opens a segment
fn case_segments(s: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (idx, ch) in s.char_indices().skip(1) {
        if ch.is_ascii_uppercase() {
            segments.push(&s[start..idx]);
            start = idx;
        }
    }
    if !s.is_empty() {
        segments.push(&s[start..]);
    }
    segments
}

/// CamelCase initials test
///
/// Only applies when the first characters are identical. Each segment of the
/// prefix must start the candidate segment at the same position, e.g. `PLF`,
/// `PLexF` and `PropL` all match `PropLexerFile`.
pub fn matches_case_split(candidate: &str, prefix: &str) -> bool {
    match (candidate.chars().next(), prefix.chars().next()) {
        (Some(a), Some(b)) if a == b => {}
        _ => return false,
    }

    let prefix_segments = case_segments(prefix);
    let candidate_segments = case_segments(candidate);
    prefix_segments.len() <= candidate_segments.len()
        && prefix_segments
            .iter()
            .zip(&candidate_segments)
            .all(|(p, c)| c.starts_with(p))
}

/// snake_case test
///
/// Leading and trailing underscores are ignored and at least one inner
/// underscore is required. The prefix matches either as initials (one
/// character per segment) or as consecutive segment prefixes, see [`spl_match`].
pub fn matches_underscore_split(candidate: &str, prefix: &str, case_sensitive: bool) -> bool {
    let trimmed = candidate.trim_matches('_');
    if !trimmed.contains('_') {
        return false;
    }

    let (trimmed, prefix) = if case_sensitive {
        (trimmed.to_string(), prefix.to_string())
    } else {
        (trimmed.to_lowercase(), prefix.to_lowercase())
    };

    let segments: Vec<&str> = trimmed.split('_').filter(|s| !s.is_empty()).collect();
    let initials: Vec<char> = prefix.chars().collect();

    if initials.len() <= segments.len()
        && initials
            .iter()
            .zip(&segments)
            .all(|(ch, segment)| segment.chars().next() == Some(*ch))
    {
        return true;
    }

    spl_match(&prefix, &segments)
}

/// Whether `prefix` splits into consecutive prefixes of `segments`
///
/// The common leading part of `prefix` and the first segment may be shared
/// with the following segments in any proportion, so every split point is
/// tried, not only the longest one. For example `pl` matches
/// `["prop", "lexer", "file"]` as `p` + `l`.
pub fn spl_match(prefix: &str, segments: &[&str]) -> bool {
    let prefix: Vec<char> = prefix.chars().collect();
    let segments: Vec<Vec<char>> = segments.iter().map(|s| s.chars().collect()).collect();
    spl_match_chars(&prefix, &segments)
}

fn spl_match_chars(prefix: &[char], segments: &[Vec<char>]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return false;
    };

    let common = prefix
        .iter()
        .zip(segment)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return false;
    }
    if common == prefix.len() {
        return true;
    }
    if rest.is_empty() {
        return false;
    }

    // The remainder is never empty here since common < prefix.len()
    (0..common).any(|i| spl_match_chars(&prefix[common - i..], rest))
}

/// The strategy chain configured for one request
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    config: &'a CompletionConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(config: &'a CompletionConfig) -> Self {
        Self { config }
    }

    /// Whether `candidate` is acceptable for `prefix` under any enabled strategy
    pub fn accepts(&self, candidate: &str, prefix: &str) -> bool {
        let config = self.config;

        if config.fuzzy {
            return is_fuzzy_match(candidate, prefix);
        }

        if config.case_split && matches_case_split(candidate, prefix) {
            return true;
        }
        if config.underscore_split && matches_underscore_split(candidate, prefix, config.case_sensitive) {
            return true;
        }

        self.is_plain(candidate, prefix)
    }

    /// Whether `candidate` is a plain prefix match; used for ranking
    pub fn is_plain(&self, candidate: &str, prefix: &str) -> bool {
        is_plain_match(candidate, prefix, self.config.case_sensitive)
    }
}
