use serde::Serialize;

/// An open document as seen by the completion engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Tab title, shown as provenance next to candidates
    pub label: String,
    /// Lexer name, empty when the document has none
    pub language: String,
    pub text: String,
}

impl Document {
    pub fn new(label: impl Into<String>, language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            language: language.into(),
            text: text.into(),
        }
    }

    /// Number of lines as the editor counts them: a trailing newline opens an
    /// extra empty line
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.text.lines().nth(index)
    }
}

/// Everything one completion request needs from the host editor
///
/// The host is expected to reject multiple carets and non-empty selections
/// before building a request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// All open documents; which ones are scanned depends on the configured scope
    pub documents: Vec<Document>,
    /// Index of the document holding the cursor
    pub current: usize,
    /// Cursor line, zero based
    pub line: usize,
    /// Cursor column in characters, zero based
    pub column: usize,
    /// Lexer at the caret when it differs from the document lexer (embedded languages)
    pub caret_language: Option<String>,
    /// Skip the lexer allow-list check
    pub ignore_lexer: bool,
}

impl CompletionRequest {
    /// Request against a single document
    pub fn single(document: Document, line: usize, column: usize) -> Self {
        Self {
            documents: vec![document],
            current: 0,
            line,
            column,
            caret_language: None,
            ignore_lexer: false,
        }
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.documents.get(self.current)
    }

    /// Language used to pick the dictionary file
    pub fn dictionary_language(&self) -> Option<&str> {
        self.caret_language
            .as_deref()
            .or_else(|| self.current_document().map(|doc| doc.language.as_str()))
    }
}

/// How a buffer candidate is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// Word with a `$` sigil
    Variable,
    Plain,
}

impl CandidateKind {
    pub fn of(word: &str) -> Self {
        if word.starts_with('$') {
            CandidateKind::Variable
        } else {
            CandidateKind::Plain
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CandidateKind::Variable => "variable",
            CandidateKind::Plain => "plain",
        }
    }
}

/// A word found in the scanned documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub text: String,
    pub kind: CandidateKind,
    /// Labels of the documents containing the word; empty unless provenance is shown
    pub sources: Vec<String>,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: CandidateKind::of(&text),
            text,
            sources: Vec::new(),
        }
    }

    /// `kind|word`, followed by `|label; label` when sources are known
    pub fn render(&self) -> String {
        let mut line = format!("{}|{}", self.kind.as_str(), self.text);
        if !self.sources.is_empty() {
            let labels: Vec<String> = self.sources.iter().map(|s| s.replace('|', "/")).collect();
            line.push('|');
            line.push_str(&labels.join("; "));
        }
        line
    }
}

/// Outcome of a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    /// Buffer words, plain prefix matches first, alphabetical otherwise
    pub buffer: Vec<Candidate>,
    /// Rendered dictionary entries, plain prefix matches first, file order otherwise
    pub dictionary: Vec<String>,
    /// Typed text left of the cursor
    pub left: String,
    /// Word text right of the cursor
    pub right: String,
    /// Whether dictionary entries are listed before buffer words
    pub dictionary_first: bool,
}

impl CompletionResult {
    /// Combined completion list in the configured order
    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.iter().map(Candidate::render);
        let dictionary = self.dictionary.iter().cloned();
        if self.dictionary_first {
            dictionary.chain(buffer).collect()
        } else {
            buffer.chain(dictionary).collect()
        }
    }

    /// Characters to replace left and right of the cursor when a candidate is accepted
    pub fn replace_span(&self) -> (usize, usize) {
        (self.left.chars().count(), self.right.chars().count())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.dictionary.is_empty()
    }
}
