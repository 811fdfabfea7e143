//! Settings file loading
//!
//! Settings are a JSON object whose keys mirror [`CompletionConfig`]. Missing
//! keys take their defaults. Per-lexer word boundary sets can be given under
//! `nonword_chars_by_lexer`:
//!
//! ```json
//! {
//!   "min_len": 4,
//!   "fuzzy": false,
//!   "underscore_split": true,
//!   "nonword_chars_by_lexer": { "CSS": "+*=/\\()[]{}<>\"'.,:;~?!@#$%^&|`" }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::completion::CompletionConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub completion: CompletionConfig,

    /// Word boundary sets overriding `nonword_chars` for specific lexers
    #[serde(default)]
    pub nonword_chars_by_lexer: HashMap<String, String>,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid settings JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = Self::from_json(&text).with_context(|| format!("In settings file {:?}", path))?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Completion config for documents using `lexer`
    pub fn config_for(&self, lexer: &str) -> CompletionConfig {
        let mut config = self.completion.clone();
        if let Some(chars) = self.nonword_chars_by_lexer.get(lexer) {
            config.nonword_chars = chars.clone();
        }
        config.normalized()
    }
}
