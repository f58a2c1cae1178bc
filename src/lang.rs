//! Language resources: stopword lists.
//!
//! Built-in lists are embedded for Dutch (`nl`) and English (`en`). A
//! custom list can be read from a file with one word per line.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

static DUTCH: Lazy<Stopwords> =
    Lazy::new(|| Stopwords::parse(include_str!("../resources/nl/stopwords.txt")));
static ENGLISH: Lazy<Stopwords> =
    Lazy::new(|| Stopwords::parse(include_str!("../resources/en/stopwords.txt")));

/// A set of lowercase stopwords. Cheap to clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: Arc<HashSet<String>>,
}

impl Stopwords {
    fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Build a list from words. Words are trimmed and lowercased; empty
    /// lines are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words: Arc::new(words),
        }
    }

    /// Read a list from a file, one word per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let stopwords = Self::parse(&text);
        log::debug!(
            "Loaded {} stopwords from {}",
            stopwords.len(),
            path.as_ref().display()
        );
        Ok(stopwords)
    }

    /// Built-in list for a language tag such as `nl`, `nl-BE` or `en_US`.
    ///
    /// Only the primary subtag is used.
    pub fn for_language(tag: &str) -> Result<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "nl" | "nld" | "dut" => Ok(DUTCH.clone()),
            "en" | "eng" => Ok(ENGLISH.clone()),
            _ => Err(Error::UnknownLanguage(tag.to_string())),
        }
    }

    /// The built-in Dutch list.
    pub fn dutch() -> Self {
        DUTCH.clone()
    }

    /// Returns true if `word` is a stopword. Case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn language_tags() {
        let nl = Stopwords::for_language("nl").unwrap();
        assert!(nl.contains("de"));
        assert!(nl.contains("De"));
        assert!(!nl.contains("hond"));
        assert_eq!(Stopwords::for_language("nl-BE").unwrap(), nl);
        assert!(Stopwords::for_language("en_US").unwrap().contains("the"));
        assert!(matches!(
            Stopwords::for_language("xx"),
            Err(Error::UnknownLanguage(_))
        ));
    }

    #[test]
    fn from_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Foo\n\n  bar  \n").unwrap();
        let words = Stopwords::from_file(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("foo") && words.contains("bar"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Stopwords::from_file("/nonexistent/stopwords.txt"),
            Err(Error::Io(_))
        ));
    }
}
