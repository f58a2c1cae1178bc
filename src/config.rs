//! Resolver configuration.
//!
//! A [`ResolverConfig`] is a plain value: load it from TOML, adjust it with
//! the `with_*` methods (the CLI does this for its flags), and hand it to
//! [`crate::Resolver::from_config`].
//!
//! ```toml
//! include_singletons = false
//! fill_gaps = true
//! language = "nl"
//! max_pronoun_distance = 3
//! ```

use crate::error::Result;
use crate::lang::Stopwords;
use crate::sieves::DEFAULT_MAX_PRONOUN_DISTANCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings of one resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Keep groups with a single mention in the output.
    pub include_singletons: bool,
    /// Widen output spans to every token between their first and last one.
    pub fill_gaps: bool,
    /// Language tag selecting the built-in stopword list.
    pub language: String,
    /// Stopword file replacing the built-in list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
    /// Sentence window of the pronoun sieve.
    pub max_pronoun_distance: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            include_singletons: false,
            fill_gaps: true,
            language: "nl".to_string(),
            stopwords_path: None,
            max_pronoun_distance: DEFAULT_MAX_PRONOUN_DISTANCE,
        }
    }
}

impl ResolverConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set `include_singletons`.
    pub fn with_singletons(mut self, include: bool) -> Self {
        self.include_singletons = include;
        self
    }

    /// Set `fill_gaps`.
    pub fn with_fill_gaps(mut self, fill: bool) -> Self {
        self.fill_gaps = fill;
        self
    }

    /// Set the language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Use a stopword file instead of the built-in list.
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }

    /// Set the pronoun sentence window.
    pub fn with_max_pronoun_distance(mut self, distance: u32) -> Self {
        self.max_pronoun_distance = distance;
        self
    }

    /// Load the stopword list this configuration selects.
    pub fn stopwords(&self) -> Result<Stopwords> {
        match &self.stopwords_path {
            Some(path) => Stopwords::from_file(path),
            None => Stopwords::for_language(&self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = ResolverConfig::from_toml_str("include_singletons = true\n").unwrap();
        assert!(config.include_singletons);
        assert!(config.fill_gaps);
        assert_eq!(config.language, "nl");
        assert_eq!(config.max_pronoun_distance, 3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ResolverConfig::from_toml_str("singletons = true\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = ResolverConfig::default()
            .with_language("en")
            .with_fill_gaps(false)
            .with_max_pronoun_distance(1);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ResolverConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn stopwords_follow_language() {
        let config = ResolverConfig::default().with_language("en");
        assert!(config.stopwords().unwrap().contains("the"));
        let config = ResolverConfig::default().with_language("fy");
        assert!(matches!(config.stopwords(), Err(Error::UnknownLanguage(_))));
    }
}
