//! Property tests for the match strategies and the token scanner

use quickcheck::{QuickCheck, TestResult};

use complete_from_text::completion::{
    is_fuzzy_match, is_plain_match, matches_case_split, matches_underscore_split, scan_tokens,
    CompletionConfig, ScanPattern,
};

/// Reference subsequence test on uppercased characters
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let haystack: Vec<char> = haystack.to_uppercase().chars().collect();
    let mut pos = 0;
    for ch in needle.to_uppercase().chars() {
        match haystack[pos..].iter().position(|&c| c == ch) {
            Some(found) => pos += found + 1,
            None => return false,
        }
    }
    true
}

#[test]
fn prop_fuzzy_is_subsequence() {
    fn prop(candidate: String, prefix: String) -> bool {
        is_fuzzy_match(&candidate, &prefix) == is_subsequence(&prefix, &candidate)
    }
    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(String, String) -> bool);
}

#[test]
fn prop_candidate_prefix_always_fuzzy_matches() {
    fn prop(candidate: String, cut: usize) -> TestResult {
        let chars: Vec<char> = candidate.chars().collect();
        if chars.is_empty() {
            return TestResult::discard();
        }
        let prefix: String = chars[..cut % chars.len()].iter().collect();
        TestResult::from_bool(
            is_plain_match(&candidate, &prefix, true) && is_fuzzy_match(&candidate, &prefix),
        )
    }
    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(String, usize) -> TestResult);
}

#[test]
fn prop_split_matches_are_fuzzy_matches() {
    // Both split strategies only accept prefixes drawn in order from the candidate
    fn prop(words: Vec<String>, take: usize) -> TestResult {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.chars().filter(|c| c.is_ascii_lowercase()).collect::<String>())
            .filter(|w| !w.is_empty())
            .collect();
        if words.len() < 2 {
            return TestResult::discard();
        }
        let candidate = words.join("_");
        let prefix: String = words.iter().take(1 + take % words.len()).filter_map(|w| w.chars().next()).collect();

        TestResult::from_bool(
            matches_underscore_split(&candidate, &prefix, true) && is_fuzzy_match(&candidate, &prefix),
        )
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<String>, usize) -> TestResult);
}

#[test]
fn prop_case_split_accepts_initials() {
    fn prop(words: Vec<String>) -> TestResult {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.chars().filter(|c| c.is_ascii_lowercase()).collect::<String>())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return TestResult::discard();
        }
        let capitalize = |w: &String| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        };
        let candidate: String = words.iter().map(capitalize).collect();
        let initials: String = candidate.chars().filter(|c| c.is_ascii_uppercase()).collect();

        TestResult::from_bool(matches_case_split(&candidate, &initials))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}

#[test]
fn prop_scan_is_idempotent() {
    fn prop(text: String) -> bool {
        let config = CompletionConfig::default();
        let Some(pattern) = ScanPattern::build("a", &config) else {
            return false;
        };
        let lines = text.lines().count();
        scan_tokens(&text, lines, &pattern, config.max_lines) == scan_tokens(&text, lines, &pattern, config.max_lines)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn prop_oversized_documents_yield_nothing() {
    fn prop(words: Vec<String>) -> TestResult {
        let text = words.join("\n");
        let lines = text.lines().count();
        if lines == 0 {
            return TestResult::discard();
        }
        let config = CompletionConfig::default();
        let Some(pattern) = ScanPattern::build("a", &config) else {
            return TestResult::failed();
        };
        TestResult::from_bool(scan_tokens(&text, lines, &pattern, lines - 1).is_empty())
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}
