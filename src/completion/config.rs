//! Matching options for a single completion request
//!
//! A `CompletionConfig` is built once (usually from the settings file) and then
//! only ever borrowed. Nothing in the engine mutates it, so the same value can be
//! shared between concurrent requests.

use serde::{Deserialize, Serialize};

/// Glyphs treated as word boundaries when no per-language override is given.
/// Space and tab are always boundaries and are not listed here.
pub const DEFAULT_NONWORD_CHARS: &str = "-+*=/\\()[]{}<>\"'.,:;~?!@#$%^&|`…";

/// Lexers completion is enabled for by default. `-` stands for "no lexer".
pub const DEFAULT_LEXERS: &str = "-,ini files ^,markdown,restructuredtext,properties";

/// Which open documents are scanned for candidate words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentScope {
    /// Only the document holding the cursor
    #[default]
    Current,
    /// Every open document
    All,
    /// Every open document whose language matches the current one
    SameLanguage,
}

impl DocumentScope {
    /// Whether candidates should carry the labels of the documents they came from
    pub fn shows_provenance(self) -> bool {
        !matches!(self, DocumentScope::Current)
    }
}

/// Immutable matching options for one completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Comma separated lexer allow-list, `*` allows every lexer
    pub lexers: String,

    /// Characters that end a word (in addition to space and tab)
    pub nonword_chars: String,

    /// Shortest candidate worth offering (default: 3)
    pub min_len: usize,

    /// Case sensitive prefix matching and scanning (default: true)
    pub case_sensitive: bool,

    /// Fuzzy subsequence matching; supersedes the split strategies (default: true)
    #[serde(alias = "fuzzy_search")]
    pub fuzzy: bool,

    /// CamelCase initials matching, e.g. `PLF` for `PropLexerFile`
    pub case_split: bool,

    /// snake_case initials matching, e.g. `plf` for `prop_lexer_file`
    pub underscore_split: bool,

    /// Documents with more lines than this are skipped entirely (default: 10000)
    pub max_lines: usize,

    /// Merge entries from the per-language dictionary file (default: true)
    #[serde(alias = "use_acp")]
    pub use_dictionary: bool,

    /// List dictionary entries before buffer words (default: false)
    #[serde(alias = "show_acp_first")]
    pub dictionary_first: bool,

    /// Which documents are scanned
    pub scope: DocumentScope,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            lexers: DEFAULT_LEXERS.to_string(),
            nonword_chars: DEFAULT_NONWORD_CHARS.to_string(),
            min_len: 3,
            case_sensitive: true,
            fuzzy: true,
            case_split: false,
            underscore_split: false,
            max_lines: 10_000,
            use_dictionary: true,
            dictionary_first: false,
            scope: DocumentScope::Current,
        }
    }
}

impl CompletionConfig {
    /// Clamp values that would make the scan pattern meaningless
    pub fn normalized(mut self) -> Self {
        self.min_len = self.min_len.max(1);
        self
    }

    /// Whether completion is enabled for the given lexer
    ///
    /// An empty lexer name is looked up as `-`. Comparison ignores case.
    pub fn is_lexer_allowed(&self, lexer: &str) -> bool {
        let allowed = format!(",{},", self.lexers.to_lowercase());
        if allowed.contains(",*,") {
            return true;
        }
        let lexer = if lexer.is_empty() { "-" } else { lexer };
        allowed.contains(&format!(",{},", lexer.to_lowercase()))
    }

    /// Whether `ch` ends a word under this configuration
    pub fn is_boundary(&self, ch: char) -> bool {
        ch == ' ' || ch == '\t' || self.nonword_chars.contains(ch)
    }
}
