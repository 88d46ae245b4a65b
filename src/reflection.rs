//! Pronoun reflection.
//!
//! Reflection swaps first-person and second-person pronouns so that user text
//! can be echoed back as a question ("my cat" becomes "your cat").

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ElizaSimpleError, Result};

/// How input is tokenized before reflection lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReflectionMode {
    /// Multi-word keys ("I am") are tried first, longest phrase wins.
    #[default]
    Phrase,
    /// Each space-delimited token is looked up on its own. Multi-word keys
    /// never match in this mode.
    Word,
}

impl FromStr for ReflectionMode {
    type Err = ElizaSimpleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "phrase" => Ok(ReflectionMode::Phrase),
            "word" => Ok(ReflectionMode::Word),
            other => Err(ElizaSimpleError::ConfigError(format!(
                "unknown reflection mode '{}' (expected 'phrase' or 'word')",
                other
            ))),
        }
    }
}

impl fmt::Display for ReflectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectionMode::Phrase => write!(f, "phrase"),
            ReflectionMode::Word => write!(f, "word"),
        }
    }
}

/// Immutable pronoun table. Keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ReflectionMap {
    entries: HashMap<String, String>,
    max_phrase_words: usize,
}

impl ReflectionMap {
    /// Builds a map from (key, replacement) pairs.
    ///
    /// # Errors
    ///
    /// Returns `ElizaSimpleError::InvalidScript` if a key is blank or two keys
    /// differ only by case.
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        let mut max_phrase_words = 0;
        for (key, replacement) in pairs {
            let key = key.as_ref();
            if key.trim().is_empty() {
                return Err(ElizaSimpleError::InvalidScript(
                    "reflection key cannot be empty".to_string(),
                ));
            }
            max_phrase_words = max_phrase_words.max(key.split(' ').count());
            if entries.insert(key.to_lowercase(), replacement.into()).is_some() {
                return Err(ElizaSimpleError::InvalidScript(format!(
                    "duplicate reflection key '{}'",
                    key
                )));
            }
        }
        Ok(Self {
            entries,
            max_phrase_words,
        })
    }

    /// Replacement for `phrase`, if any.
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.entries.get(&phrase.to_lowercase()).map(String::as_str)
    }

    /// Word count of the longest key.
    pub fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Applies a [`ReflectionMap`] to text in a single left-to-right pass.
#[derive(Debug, Clone, Default)]
pub struct Reflector {
    map: ReflectionMap,
    mode: ReflectionMode,
}

impl Reflector {
    /// Creates a reflector over `map`.
    pub fn new(map: ReflectionMap, mode: ReflectionMode) -> Self {
        Self { map, mode }
    }

    /// The tokenization mode in use.
    pub fn mode(&self) -> ReflectionMode {
        self.mode
    }

    /// The underlying table.
    pub fn map(&self) -> &ReflectionMap {
        &self.map
    }

    /// Reflects pronouns in `text`.
    ///
    /// The text is split on single spaces and rejoined with single spaces, so
    /// runs of spaces survive as empty tokens. Replaced output is never
    /// looked up again, which keeps "I" -> "you" and "you are" -> "I am" from
    /// feeding into each other.
    pub fn reflect(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split(' ').collect();
        let window = match self.mode {
            ReflectionMode::Word => 1,
            ReflectionMode::Phrase => self.map.max_phrase_words().max(1),
        };

        let mut out: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let longest = window.min(tokens.len() - i);
            let hit = (1..=longest).rev().find_map(|n| {
                self.map
                    .lookup(&tokens[i..i + n].join(" "))
                    .map(|replacement| (n, replacement))
            });
            match hit {
                Some((n, replacement)) => {
                    out.push(replacement);
                    i += n;
                }
                None => {
                    out.push(tokens[i]);
                    i += 1;
                }
            }
        }
        out.join(" ")
    }
}
