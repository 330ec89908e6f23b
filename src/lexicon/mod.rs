//! Trigger lexicon
//!
//! Static mapping of flagged phrases to neutral replacements, each tagged with
//! a [`TriggerCategory`]. The lexicon is immutable once built and is shared by
//! reference between every detector, rewriter and validator, so concurrent
//! callers read it without locking.
//!
//! # Custom lexicon format
//!
//! ```toml
//! [[entry]]
//! phrase = "encore"
//! replacement = "à nouveau"
//! category = "reproach"
//! ```

mod builtin;

use crate::models::TriggerCategory;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Errors raised while building a lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Lexicon phrase is empty")]
    EmptyPhrase,

    #[error("Duplicate lexicon phrase: '{0}'")]
    DuplicatePhrase(String),

    #[error("Replacement '{replacement}' for '{phrase}' contains trigger phrase '{contained}'")]
    SelfTriggering {
        phrase: String,
        replacement: String,
        contained: String,
    },

    #[error("Invalid pattern for '{phrase}': {source}")]
    InvalidPattern {
        phrase: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lexicon file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One flagged phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phrase: String,
    pub replacement: String,
    pub category: TriggerCategory,
}

impl LexiconEntry {
    pub fn new(
        phrase: impl Into<String>,
        replacement: impl Into<String>,
        category: TriggerCategory,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            replacement: replacement.into(),
            category,
        }
    }
}

#[derive(Deserialize)]
struct LexiconFile {
    #[serde(rename = "entry", default)]
    entries: Vec<LexiconEntry>,
}

/// Case folding used for every containment test.
///
/// Typographic apostrophes are mapped to ASCII ones so "c’est" and "c'est"
/// fold to the same key.
pub fn fold(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Immutable phrase table
#[derive(Debug)]
pub struct TriggerLexicon {
    /// Sorted longest phrase first so overlapping phrases substitute whole
    entries: Vec<LexiconEntry>,
    /// Case-insensitive literal pattern per entry, same order as `entries`
    patterns: Vec<Regex>,
}

static BUILTIN: OnceLock<Arc<TriggerLexicon>> = OnceLock::new();

impl TriggerLexicon {
    /// Shared built-in French lexicon, built once per process
    pub fn builtin() -> Arc<TriggerLexicon> {
        BUILTIN
            .get_or_init(|| {
                let entries = builtin::BUILTIN_ENTRIES
                    .iter()
                    .map(|(p, r, c)| LexiconEntry::new(*p, *r, *c))
                    .collect();
                Arc::new(Self::from_entries(entries).expect("built-in lexicon is valid"))
            })
            .clone()
    }

    /// Build a lexicon, rejecting duplicate (after case folding) and
    /// self-triggering entries.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Result<Self, LexiconError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());
        for entry in entries {
            let phrase = fold(entry.phrase.trim());
            if phrase.is_empty() {
                return Err(LexiconError::EmptyPhrase);
            }
            if !seen.insert(phrase.clone()) {
                return Err(LexiconError::DuplicatePhrase(phrase));
            }
            normalized.push(LexiconEntry {
                phrase,
                replacement: entry.replacement.trim().to_string(),
                category: entry.category,
            });
        }

        for entry in &normalized {
            let folded = fold(&entry.replacement);
            if let Some(other) = normalized.iter().find(|o| folded.contains(&o.phrase)) {
                return Err(LexiconError::SelfTriggering {
                    phrase: entry.phrase.clone(),
                    replacement: entry.replacement.clone(),
                    contained: other.phrase.clone(),
                });
            }
        }

        normalized.sort_by(|a, b| {
            b.phrase
                .chars()
                .count()
                .cmp(&a.phrase.chars().count())
                .then_with(|| a.phrase.cmp(&b.phrase))
        });

        let patterns = normalized
            .iter()
            .map(|e| {
                Regex::new(&format!("(?i){}", literal_pattern(&e.phrase))).map_err(|source| {
                    LexiconError::InvalidPattern {
                        phrase: e.phrase.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entries: normalized,
            patterns,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = toml::from_str(content)?;
        Self::from_entries(file.entries)
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose phrase occurs in `text` (case-insensitive)
    pub fn matches(&self, text: &str) -> Vec<&LexiconEntry> {
        let folded = fold(text);
        self.entries
            .iter()
            .filter(|e| folded.contains(&e.phrase))
            .collect()
    }

    /// First phrase (longest first) still present in `text`
    pub fn first_match(&self, text: &str) -> Option<&LexiconEntry> {
        let folded = fold(text);
        self.entries.iter().find(|e| folded.contains(&e.phrase))
    }

    pub fn contains_trigger(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// One substitution pass: every phrase, longest first, replaced by its
    /// neutral counterpart. The rest of the text is kept verbatim.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (entry, pattern) in self.entries.iter().zip(&self.patterns) {
            if pattern.is_match(&out) {
                out = pattern
                    .replace_all(&out, regex::NoExpand(&entry.replacement))
                    .into_owned();
            }
        }
        out
    }
}

/// Escaped literal that also accepts a typographic apostrophe wherever the
/// phrase has an ASCII one.
fn literal_pattern(phrase: &str) -> String {
    phrase
        .split('\'')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("['\u{2019}]")
}
