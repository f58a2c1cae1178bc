//! Mention-level documents: the input the sieves work on.
//!
//! A [`MentionDocument`] is what an annotation source hands to the resolver:
//! the mentions in document order, the surface string of every token offset,
//! and the direct-speech quotations. Term-level input is turned into one by
//! [`crate::extract`].

use crate::quotation::Quotation;
use multisieve_core::{Mention, Offset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Surface strings keyed by token offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetStrings(BTreeMap<Offset, String>);

impl OffsetStrings {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the surface string of a token.
    pub fn insert(&mut self, offset: Offset, surface: impl Into<String>) {
        self.0.insert(offset, surface.into());
    }

    /// Surface string at an offset.
    pub fn get(&self, offset: Offset) -> Option<&str> {
        self.0.get(&offset).map(String::as_str)
    }

    /// Surface strings of the known offsets of a span, in span order.
    pub fn words<'a>(&'a self, span: &'a [Offset]) -> impl Iterator<Item = &'a str> + 'a {
        span.iter().filter_map(move |&o| self.get(o))
    }

    /// The span rendered as one space-separated string.
    pub fn render(&self, span: &[Offset]) -> String {
        self.words(span).collect::<Vec<_>>().join(" ")
    }

    /// Every known offset, in document order.
    pub fn offsets(&self) -> Vec<Offset> {
        self.0.keys().copied().collect()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no token is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Offset, String)> for OffsetStrings {
    fn from_iter<I: IntoIterator<Item = (Offset, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(Offset, &'a str)> for OffsetStrings {
    fn from_iter<I: IntoIterator<Item = (Offset, &'a str)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(o, s)| (o, s.to_string())).collect())
    }
}

/// A document whose mentions are already materialised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionDocument {
    /// Document identifier, copied to the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Mentions in document order.
    pub mentions: Vec<Mention>,
    /// Surface string of every token offset.
    #[serde(alias = "offset2string")]
    pub tokens: OffsetStrings,
    /// Direct-speech quotations, in the order they should be tried.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quotations: Vec<Quotation>,
}

impl MentionDocument {
    /// Create a document from mentions and their token table.
    pub fn new(mentions: Vec<Mention>, tokens: OffsetStrings) -> Self {
        Self {
            id: None,
            mentions,
            tokens,
            quotations: Vec::new(),
        }
    }

    /// Set the document identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the quotations.
    pub fn with_quotations(mut self, quotations: Vec<Quotation>) -> Self {
        self.quotations = quotations;
        self
    }
}
