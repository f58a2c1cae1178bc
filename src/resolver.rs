//! The resolver: configuration, stopwords and the ordered sieves.
//!
//! ```rust
//! use multisieve::{MentionDocument, OffsetStrings, Resolver};
//! use multisieve::Mention;
//!
//! let tokens: OffsetStrings = [(0, "Obama"), (6, "lacht"), (12, "Obama")].into_iter().collect();
//! let mentions = vec![
//!     Mention::new(0, [0], 0).with_head_pos("name"),
//!     Mention::new(1, [12], 12).with_head_pos("name"),
//! ];
//! let output = Resolver::new().resolve(&MentionDocument::new(mentions, tokens)).unwrap();
//! assert_eq!(output.groups.len(), 1);
//! ```

use crate::config::ResolverConfig;
use crate::document::MentionDocument;
use crate::error::Result;
use crate::extract::{extract_mentions, TermDocument};
use crate::lang::Stopwords;
use crate::output::CoreferenceOutput;
use crate::runner::SieveRunner;
use crate::sieves::{default_sieves, Sieve};
use multisieve_core::Entities;

/// Resolves documents with a fixed configuration and sieve order.
///
/// A resolver holds no per-document state and can be shared between
/// threads.
pub struct Resolver {
    config: ResolverConfig,
    stopwords: Stopwords,
    sieves: Vec<Box<dyn Sieve>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sieves.iter().map(|s| s.name()).collect();
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("stopwords", &self.stopwords.len())
            .field("sieves", &names)
            .finish()
    }
}

impl Resolver {
    /// Default configuration with the built-in Dutch stopwords.
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
            stopwords: Stopwords::dutch(),
            sieves: default_sieves(),
        }
    }

    /// Build a resolver from a configuration, loading its stopwords.
    ///
    /// # Errors
    ///
    /// Fails if the configured language is unknown or the stopword file
    /// cannot be read.
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        let stopwords = config.stopwords()?;
        log::debug!(
            "Resolver for language {} with {} stopwords",
            config.language,
            stopwords.len()
        );
        Ok(Self {
            config,
            stopwords,
            sieves: default_sieves(),
        })
    }

    /// Replace the sieve sequence.
    #[must_use]
    pub fn with_sieves(mut self, sieves: Vec<Box<dyn Sieve>>) -> Self {
        self.sieves = sieves;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The stopwords used for mention extraction.
    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Run every sieve over the document and return the final collection.
    pub fn resolve_entities(&self, doc: &MentionDocument) -> Result<Entities> {
        let mut entities = Entities::from_mentions(doc.mentions.iter().cloned())?;
        log::info!(
            "Resolving {} mentions ({} quotations)",
            entities.len(),
            doc.quotations.len()
        );
        SieveRunner::new(&mut entities, &doc.tokens)
            .with_quotations(&doc.quotations)
            .with_max_pronoun_distance(self.config.max_pronoun_distance)
            .run_all(&self.sieves)?;
        Ok(entities)
    }

    /// Resolve a document into coreference groups.
    pub fn resolve(&self, doc: &MentionDocument) -> Result<CoreferenceOutput> {
        let entities = self.resolve_entities(doc)?;
        let output = CoreferenceOutput::from_entities(doc.id.clone(), &entities, &doc.tokens, &self.config);
        log::info!("{} coreference groups", output.len());
        Ok(output)
    }

    /// Extract mentions from a term document, then resolve them.
    pub fn resolve_terms(&self, doc: &TermDocument) -> Result<CoreferenceOutput> {
        let mentions = extract_mentions(doc, &self.stopwords)?;
        self.resolve(&mentions)
    }

    /// Resolve many documents. Results keep the input order.
    #[cfg(feature = "parallel")]
    pub fn resolve_batch(&self, docs: &[MentionDocument]) -> Vec<Result<CoreferenceOutput>> {
        use rayon::prelude::*;
        docs.par_iter().map(|doc| self.resolve(doc)).collect()
    }

    /// Resolve many documents. Results keep the input order.
    #[cfg(not(feature = "parallel"))]
    pub fn resolve_batch(&self, docs: &[MentionDocument]) -> Vec<Result<CoreferenceOutput>> {
        docs.iter().map(|doc| self.resolve(doc)).collect()
    }
}
