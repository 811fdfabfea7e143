//! Per-language supplementary word lists (`.acp` files)
//!
//! A dictionary file lives at `<data_dir>/autocomplete/<language>.acp`, with
//! `<language>_.acp` as a fallback name. Its format is line based:
//!
//! ```text
//! #chars ...                      <- optional header, skipped
//! TRIGGER WORD[ARGS][|DESCRIPTION]
//! ```
//!
//! `WORD` runs up to the first `(`, `|` or whitespace. `ARGS` is kept verbatim
//! and `%20` in `WORD` stands for a space. Lines that do not fit the grammar are
//! ignored.
//!
//! Parsed catalogs are kept in a small LRU cache keyed by file path and
//! invalidated when the file's modification time changes.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::matching::Matcher;
use super::ranking::plain_first;
use super::word::PrefixSplit;

/// First-line marker of the optional header row
const HEADER_TOKEN: &str = "#chars";

/// Number of parsed dictionary files kept in memory
const CACHE_CAPACITY: usize = 16;

static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s([^(|\s]+)([^|]*)\|?(.*)$").expect("dictionary line pattern is valid")
});

/// Errors raised while reading a dictionary file
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One parsed dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Leading glyph naming the entry kind in the completion list
    pub trigger: String,
    /// The word as written in the file (`%20` not yet decoded)
    pub word: String,
    /// Call signature fragment, e.g. `(x, y)`
    pub args: String,
    /// Free text shown next to the entry
    pub description: String,
}

impl DictionaryEntry {
    /// Parse one line; `None` if it does not fit the grammar
    pub fn parse(line: &str) -> Option<Self> {
        let captures = ENTRY_LINE.captures(line)?;
        Some(Self {
            trigger: captures[1].to_string(),
            word: captures[2].to_string(),
            args: captures[3].to_string(),
            description: captures.get(4).map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// The word with `%20` decoded to a space
    pub fn display_word(&self) -> String {
        self.word.replace("%20", " ")
    }

    /// Completion list encoding: `trigger|word|args<TAB>description`
    pub fn render(&self) -> String {
        format!("{}|{}|{}\t{}", self.trigger, self.display_word(), self.args, self.description)
    }
}

/// Dictionary candidates selected for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryCandidates {
    /// Rendered entries, plain prefix matches first, file order otherwise
    pub lines: Vec<String>,
    /// Decoded words of the selected entries, used to drop buffer duplicates
    pub words: HashSet<String>,
}

/// Parsed contents of one dictionary file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryCatalog {
    entries: Vec<DictionaryEntry>,
}

impl DictionaryCatalog {
    /// Parse dictionary text, skipping a leading `#chars` header row
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().peekable();
        if lines.peek().is_some_and(|first| first.starts_with(HEADER_TOKEN)) {
            lines.next();
        }

        let entries = lines
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .filter_map(DictionaryEntry::parse)
            .collect();

        Self { entries }
    }

    /// Locate the dictionary file for `language`, trying the fallback name second
    pub fn resolve_path(data_dir: &Path, language: &str) -> Option<PathBuf> {
        let dir = data_dir.join("autocomplete");
        [format!("{}.acp", language), format!("{}_.acp", language)]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Read and parse the file at `path`
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load_file(path: &Path) -> Result<Self, DictionaryError> {
        let bytes = fs::read(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Load the dictionary for `language`; a missing file gives an empty catalog
    pub fn load(data_dir: &Path, language: &str) -> Result<Self, DictionaryError> {
        match Self::resolve_path(data_dir, language) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select and render the entries that complete `split.left`
    ///
    /// Entries shorter than `min_len`, equal to the typed prefix, or equal to
    /// the whole word under the cursor are dropped.
    pub fn candidates(&self, split: &PrefixSplit, matcher: &Matcher<'_>, min_len: usize) -> DictionaryCandidates {
        let whole_word = split.whole_word();

        let selected: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|entry| entry.word.chars().count() >= min_len)
            .filter(|entry| entry.word != split.left && entry.word != whole_word)
            .filter(|entry| matcher.accepts(&entry.word, &split.left))
            .map(|entry| (entry.display_word(), entry.render()))
            .collect();

        let words = selected.iter().map(|(word, _)| word.clone()).collect();
        let lines = plain_first(selected, |(word, _)| matcher.is_plain(word, &split.left))
            .into_iter()
            .map(|(_, line)| line)
            .collect();

        DictionaryCandidates { lines, words }
    }
}

struct CachedCatalog {
    modified: Option<SystemTime>,
    catalog: Arc<DictionaryCatalog>,
}

/// Cross-request cache of parsed dictionary files
///
/// Entries are keyed by path and reused only while the file's modification
/// time is unchanged.
pub struct DictionaryCache {
    entries: Mutex<LruCache<PathBuf, CachedCatalog>>,
}

impl std::fmt::Debug for DictionaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryCache")
            .field("len", &self.entries.lock().len())
            .finish()
    }
}

impl Default for DictionaryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryCache {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Catalog for `language`, read from disk only if absent or changed
    ///
    /// Read failures are logged and yield an empty catalog.
    pub fn get(&self, data_dir: &Path, language: &str) -> Arc<DictionaryCatalog> {
        let Some(path) = DictionaryCatalog::resolve_path(data_dir, language) else {
            debug!("No dictionary file for language {:?}", language);
            return Arc::new(DictionaryCatalog::default());
        };

        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();

        if let Some(cached) = self.entries.lock().get(&path) {
            if cached.modified.is_some() && cached.modified == modified {
                return Arc::clone(&cached.catalog);
            }
        }

        // Read without holding the lock; a concurrent miss may read the file twice
        let catalog = match DictionaryCatalog::load_file(&path) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                warn!("{}", e);
                return Arc::new(DictionaryCatalog::default());
            }
        };
        debug!("Loaded {} dictionary entries from {:?}", catalog.entries().len(), path);

        self.entries.lock().put(
            path,
            CachedCatalog {
                modified,
                catalog: Arc::clone(&catalog),
            },
        );
        catalog
    }

    /// Number of cached files
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::config::CompletionConfig;
    use indoc::indoc;

    fn split(left: &str, right: &str) -> PrefixSplit {
        PrefixSplit {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    #[test]
    fn test_parse_entry_with_args_and_description() {
        let entry = DictionaryEntry::parse("^ foreach(x)|loop over x").unwrap();
        assert_eq!(entry.trigger, "^");
        assert_eq!(entry.word, "foreach");
        assert_eq!(entry.args, "(x)");
        assert_eq!(entry.description, "loop over x");
    }

    #[test]
    fn test_parse_bare_entry() {
        let entry = DictionaryEntry::parse("var counter").unwrap();
        assert_eq!(entry.word, "counter");
        assert_eq!(entry.args, "");
        assert_eq!(entry.description, "");
        assert_eq!(entry.render(), "var|counter|\t");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(DictionaryEntry::parse("lonely").is_none());
        assert!(DictionaryEntry::parse(" leading space").is_none());
        assert!(DictionaryEntry::parse("^ (x)").is_none());
    }

    #[test]
    fn test_header_row_is_skipped() {
        let catalog = DictionaryCatalog::parse(indoc! {"
            #chars _$
            ^ foreach(x)|loop over x

            func print_line(s)
        "});
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.entries()[0].word, "foreach");
        assert_eq!(catalog.entries()[1].word, "print_line");
    }

    #[test]
    fn test_header_only_on_first_line() {
        let catalog = DictionaryCatalog::parse("^ alpha\n#chars beta\n");
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.entries()[1].trigger, "#chars");
    }

    #[test]
    fn test_space_escape() {
        let entry = DictionaryEntry::parse("kw end%20if|closes a block").unwrap();
        assert_eq!(entry.display_word(), "end if");
        assert_eq!(entry.render(), "kw|end if|\tcloses a block");
    }

    #[test]
    fn test_candidates_filtering_and_order() {
        let catalog = DictionaryCatalog::parse(indoc! {"
            f for_each_item()
            f format(fmt)|format a string
            f fo
            f fox
            f of_factor
        "});
        let config = CompletionConfig::default();
        let matcher = Matcher::new(&config);

        let result = catalog.candidates(&split("fo", "x"), &matcher, config.min_len);
        assert_eq!(
            result.lines,
            vec![
                "f|for_each_item|()\t".to_string(),
                "f|format|(fmt)\tformat a string".to_string(),
                "f|of_factor|\t".to_string(),
            ]
        );
        assert!(result.words.contains("format"));
        assert!(!result.words.contains("fox"));
    }

    #[test]
    fn test_candidates_exclude_typed_prefix() {
        let catalog = DictionaryCatalog::parse(indoc! {"
            kw foo
            kw food
            kw foobar
        "});
        let config = CompletionConfig::default();
        let matcher = Matcher::new(&config);

        let result = catalog.candidates(&split("foo", "d"), &matcher, config.min_len);
        assert_eq!(result.lines, vec!["kw|foobar|\t".to_string()]);
        assert!(!result.words.contains("foo"));
        assert!(!result.words.contains("food"));
    }

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = DictionaryCatalog::load(dir.path(), "Python").unwrap();
        assert!(catalog.is_empty());
    }
}
