//! Request orchestration
//!
//! A request runs start to finish without any state carried over from previous
//! requests, apart from the dictionary file cache:
//!
//! 1. Check the lexer allow-list and extract the prefix under the cursor
//! 2. Build the scan pattern from the first prefix character
//! 3. Scan every selected document (in parallel) for tokens
//! 4. Select dictionary entries, if enabled
//! 5. Drop tokens equal to the typed text or already offered by the dictionary
//! 6. Filter by the configured match strategies and rank plain matches first

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use super::config::{CompletionConfig, DocumentScope};
use super::dictionary::{DictionaryCache, DictionaryCandidates};
use super::matching::Matcher;
use super::pattern::ScanPattern;
use super::ranking::plain_first;
use super::scanner::scan_tokens;
use super::word::{split_at_cursor, PrefixSplit};
use crate::models::{Candidate, CompletionRequest, CompletionResult, Document};

/// Word completion engine
///
/// Holds the configuration, the location of dictionary files, and a cache of
/// parsed dictionaries. Scanned tokens are never cached.
#[derive(Debug)]
pub struct CompletionEngine {
    config: CompletionConfig,
    data_dir: Option<PathBuf>,
    dictionaries: DictionaryCache,
}

impl CompletionEngine {
    /// Engine without dictionary files
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            config: config.normalized(),
            data_dir: None,
            dictionaries: DictionaryCache::new(),
        }
    }

    /// Engine reading dictionaries from `<data_dir>/autocomplete/`
    pub fn with_data_dir(config: CompletionConfig, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Compute completions for `request`
    ///
    /// Returns `None` when there is nothing to offer: unsupported lexer, no
    /// usable prefix, cursor out of range, or no matching words at all.
    pub fn complete(&self, request: &CompletionRequest) -> Option<CompletionResult> {
        let config = &self.config;
        let current = request.current_document()?;

        if !request.ignore_lexer && !config.is_lexer_allowed(&current.language) {
            debug!("Completion disabled for lexer {:?}", current.language);
            return None;
        }

        let line = current.line(request.line)?;
        let split = split_at_cursor(line, request.column, config)?;
        if !split.is_completable() {
            debug!("Nothing to complete for prefix {:?}", split.left);
            return None;
        }

        let pattern = ScanPattern::build(&split.left, config)?;
        let matcher = Matcher::new(config);

        let documents = self.select_documents(request, current);
        let tokens_by_document: Vec<(&str, BTreeSet<String>)> = documents
            .par_iter()
            .map(|doc| {
                let tokens = scan_tokens(&doc.text, doc.line_count(), &pattern, config.max_lines);
                (doc.label.as_str(), tokens)
            })
            .collect();

        let dictionary = self.dictionary_candidates(request, &split, &matcher);
        let buffer = self.buffer_candidates(&tokens_by_document, &split, &matcher, &dictionary);

        debug!(
            "Prefix {:?}: {} buffer and {} dictionary candidates from {} documents",
            split.left,
            buffer.len(),
            dictionary.lines.len(),
            documents.len()
        );

        if buffer.is_empty() && dictionary.lines.is_empty() {
            return None;
        }

        Some(CompletionResult {
            buffer,
            dictionary: dictionary.lines,
            left: split.left,
            right: split.right,
            dictionary_first: config.dictionary_first,
        })
    }

    fn select_documents<'r>(&self, request: &'r CompletionRequest, current: &'r Document) -> Vec<&'r Document> {
        match self.config.scope {
            DocumentScope::Current => vec![current],
            DocumentScope::All => request.documents.iter().collect(),
            DocumentScope::SameLanguage => request
                .documents
                .iter()
                .filter(|doc| doc.language == current.language)
                .collect(),
        }
    }

    fn dictionary_candidates(
        &self,
        request: &CompletionRequest,
        split: &PrefixSplit,
        matcher: &Matcher<'_>,
    ) -> DictionaryCandidates {
        if !self.config.use_dictionary {
            return DictionaryCandidates::default();
        }
        let (Some(data_dir), Some(language)) = (self.data_dir.as_deref(), request.dictionary_language()) else {
            return DictionaryCandidates::default();
        };

        self.dictionaries
            .get(data_dir, language)
            .candidates(split, matcher, self.config.min_len)
    }

    fn buffer_candidates(
        &self,
        tokens_by_document: &[(&str, BTreeSet<String>)],
        split: &PrefixSplit,
        matcher: &Matcher<'_>,
        dictionary: &DictionaryCandidates,
    ) -> Vec<Candidate> {
        let whole_word = split.whole_word();
        let with_sources = self.config.scope.shows_provenance();

        // BTreeMap keeps the union sorted and remembers which documents had each word
        let mut union: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (label, tokens) in tokens_by_document {
            for token in tokens {
                union.entry(token.as_str()).or_default().push(*label);
            }
        }

        let accepted = union
            .into_iter()
            .filter(|(word, _)| !dictionary.words.contains(*word))
            .filter(|(word, _)| *word != split.left && *word != whole_word)
            .filter(|(word, _)| matcher.accepts(word, &split.left));

        plain_first(accepted, |(word, _)| matcher.is_plain(word, &split.left))
            .into_iter()
            .map(|(word, labels)| {
                let mut candidate = Candidate::new(word);
                if with_sources {
                    candidate.sources = labels.into_iter().map(str::to_string).collect();
                }
                candidate
            })
            .collect()
    }
}
