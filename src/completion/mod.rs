//! Word completion from document text
//!
//! This module provides:
//! - Prefix extraction around the cursor with a configurable word boundary set
//! - Token scanning of open documents with a first-character regex
//! - Plain, fuzzy, CamelCase-split and snake_case-split matching
//! - Per-language dictionary files merged into the results
//! - Plain-first ranking of buffer and dictionary candidates

pub mod aggregator;
pub mod config;
pub mod dictionary;
pub mod matching;
pub mod pattern;
pub mod ranking;
pub mod scanner;
pub mod word;

pub use aggregator::CompletionEngine;
pub use config::{CompletionConfig, DocumentScope, DEFAULT_LEXERS, DEFAULT_NONWORD_CHARS};
pub use dictionary::{DictionaryCache, DictionaryCandidates, DictionaryCatalog, DictionaryEntry, DictionaryError};
pub use matching::{is_fuzzy_match, is_plain_match, matches_case_split, matches_underscore_split, spl_match, Matcher};
pub use pattern::ScanPattern;
pub use ranking::plain_first;
pub use scanner::scan_tokens;
pub use word::{split_at_cursor, PrefixSplit};
