//! Term-level input documents.
//!
//! A [`TermDocument`] carries the linguistic layers the extractor needs:
//! terms with their morphology, dependency edges, named-entity annotations
//! and, optionally, annotated quotations. Terms are referred to by id and
//! listed in document order.

use crate::error::{Error, Result};
use multisieve_core::Offset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Open- or closed-class term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    /// Content word.
    #[default]
    Open,
    /// Function word.
    Closed,
}

/// One term: a token with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Identifier used by dependencies and annotations.
    pub id: String,
    /// Offset of the first character.
    pub offset: Offset,
    /// Length in characters. Defaults to the length of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Surface string.
    pub text: String,
    /// Lemma. An empty lemma stands for the text, see [`Term::lemma`].
    #[serde(default)]
    pub lemma: String,
    /// Coarse part of speech (`noun`, `pron`, `name`, `det`, `prep`, ...).
    pub pos: String,
    /// Fine-grained morphological tag, e.g. `VNW(pers,pron,nomin,vol,3,ev,masc)`.
    #[serde(default)]
    pub morphofeat: String,
    /// Sentence number.
    #[serde(default)]
    pub sentence: u32,
    /// Open or closed class.
    #[serde(default, rename = "type")]
    pub term_type: TermType,
}

impl Term {
    /// Create a term. The lemma defaults to the text.
    pub fn new(id: impl Into<String>, offset: Offset, text: impl Into<String>, pos: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            offset,
            length: None,
            lemma: text.clone(),
            text,
            pos: pos.into(),
            morphofeat: String::new(),
            sentence: 0,
            term_type: TermType::Open,
        }
    }

    /// Set the lemma.
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the morphological tag.
    pub fn with_morphofeat(mut self, morphofeat: impl Into<String>) -> Self {
        self.morphofeat = morphofeat.into();
        self
    }

    /// Set the sentence number.
    pub fn with_sentence(mut self, sentence: u32) -> Self {
        self.sentence = sentence;
        self
    }

    /// Mark as a closed-class term.
    pub fn closed(mut self) -> Self {
        self.term_type = TermType::Closed;
        self
    }

    /// The lemma, or the text when no lemma was annotated.
    pub fn lemma(&self) -> &str {
        if self.lemma.is_empty() {
            &self.text
        } else {
            &self.lemma
        }
    }

    /// Length in characters.
    pub fn len(&self) -> u32 {
        self.length
            .unwrap_or_else(|| u32::try_from(self.text.chars().count()).unwrap_or(u32::MAX))
    }

    /// Returns true for a zero-length term.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset just past the last character.
    pub fn end(&self) -> Offset {
        self.offset.saturating_add(self.len())
    }
}

/// A labelled dependency edge from a head to a dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Head term id.
    pub from: String,
    /// Dependent term id.
    pub to: String,
    /// Relation, e.g. `hd/su` or `hd/mod`.
    pub function: String,
}

impl Dependency {
    /// Create an edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            function: function.into(),
        }
    }
}

/// A named-entity annotation over a term span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Label such as `PER` or `ORG`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Term ids.
    pub span: Vec<String>,
}

impl NamedEntity {
    /// Create an annotation.
    pub fn new<S: Into<String>>(entity_type: impl Into<String>, span: impl IntoIterator<Item = S>) -> Self {
        Self {
            entity_type: entity_type.into(),
            span: span.into_iter().map(Into::into).collect(),
        }
    }
}

/// An annotated quotation; participants are term spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationAnnotation {
    /// Term ids of the quoted text.
    pub span: Vec<String>,
    /// Speaker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
    /// Addressee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressee: Option<Vec<String>>,
    /// Topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Vec<String>>,
}

/// A document of terms with its linguistic layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDocument {
    /// Document identifier, copied to the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Terms in document order.
    pub terms: Vec<Term>,
    /// Dependency edges.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Named-entity annotations.
    #[serde(default)]
    pub entities: Vec<NamedEntity>,
    /// Annotated quotations. When absent, quotations are detected from
    /// quote marks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotations: Option<Vec<QuotationAnnotation>>,
}

impl TermDocument {
    /// Create a document from terms.
    pub fn new(terms: Vec<Term>) -> Self {
        Self {
            terms,
            ..Self::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add dependency edges.
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    /// Add named-entity annotations.
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = NamedEntity>) -> Self {
        self.entities.extend(entities);
        self
    }

    /// Supply quotations instead of detecting them.
    pub fn with_quotations(mut self, quotations: Vec<QuotationAnnotation>) -> Self {
        self.quotations = Some(quotations);
        self
    }
}

/// Term id to position lookup.
#[derive(Debug)]
pub(crate) struct TermIndex<'d> {
    terms: &'d [Term],
    positions: HashMap<&'d str, usize>,
}

impl<'d> TermIndex<'d> {
    pub(crate) fn new(terms: &'d [Term]) -> Result<Self> {
        let mut positions = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if positions.insert(term.id.as_str(), i).is_some() {
                return Err(Error::extraction(format!("duplicate term id {:?}", term.id)));
            }
        }
        Ok(Self { terms, positions })
    }

    pub(crate) fn position(&self, id: &str) -> Result<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| Error::extraction(format!("unknown term id {id:?}")))
    }

    pub(crate) fn positions<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<usize>> {
        ids.iter().map(|id| self.position(id.as_ref())).collect()
    }

    pub(crate) fn term(&self, position: usize) -> &'d Term {
        &self.terms[position]
    }

    pub(crate) fn terms(&self) -> &'d [Term] {
        self.terms
    }

    pub(crate) fn offsets(&self, positions: impl IntoIterator<Item = usize>) -> Vec<Offset> {
        positions.into_iter().map(|p| self.terms[p].offset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_length_defaults_to_text() {
        let term = Term::new("t1", 10, "hond", "noun");
        assert_eq!(term.len(), 4);
        assert_eq!(term.end(), 14);
        assert_eq!(term.lemma, "hond");
    }

    #[test]
    fn json_defaults() {
        let doc: TermDocument = serde_json::from_str(
            r#"{"terms": [{"id": "t1", "offset": 0, "text": "Jan", "pos": "name", "type": "open"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.terms[0].sentence, 0);
        assert!(doc.dependencies.is_empty());
        assert!(doc.quotations.is_none());
    }

    #[test]
    fn index_rejects_unknown_and_duplicate_ids() {
        let terms = vec![Term::new("t1", 0, "a", "det"), Term::new("t2", 2, "b", "noun")];
        let index = TermIndex::new(&terms).unwrap();
        assert_eq!(index.position("t2").unwrap(), 1);
        assert!(matches!(index.position("t9"), Err(Error::Extraction(_))));

        let dup = vec![Term::new("t1", 0, "a", "det"), Term::new("t1", 2, "b", "noun")];
        assert!(TermIndex::new(&dup).is_err());
    }
}
