//! Mentions: candidate referring expressions and their linguistic features.
//!
//! A [`Mention`] is built once, from the annotation layer or by the
//! extraction module of the `multisieve` crate, and never changes afterwards.
//! Resolution shares mentions between entities through `Arc`, so a merge
//! never copies feature data.
//!
//! Every optional feature uses `Option`. `None` means "unknown" and acts as
//! a wildcard in compatibility checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token offset: the character offset at which a term starts in the document.
pub type Offset = u32;

/// A span of token offsets.
pub type Span = Vec<Offset>;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier of a mention within one resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionId(pub u32);

impl fmt::Display for MentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl From<u32> for MentionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// =============================================================================
// Feature types
// =============================================================================

/// Named-entity type of a mention.
///
/// The four CoNLL types are the "proper" types; any other label the
/// annotation source uses is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Person name (PER)
    Person,
    /// Organization name (ORG)
    Organization,
    /// Location (LOC)
    Location,
    /// Miscellaneous named entity (MISC)
    Misc,
    /// Any other label
    Other(String),
}

impl EntityType {
    /// Convert to the CoNLL label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityType::Person => "PER",
            EntityType::Organization => "ORG",
            EntityType::Location => "LOC",
            EntityType::Misc => "MISC",
            EntityType::Other(s) => s.as_str(),
        }
    }

    /// Parse from a label string. Unknown labels become `Other`.
    ///
    /// Handles CoNLL (PER) and OntoNotes-style (PERSON) names.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "PER" | "PERSON" => EntityType::Person,
            "ORG" | "ORGANIZATION" => EntityType::Organization,
            "LOC" | "LOCATION" => EntityType::Location,
            "MISC" => EntityType::Misc,
            _ => EntityType::Other(label.to_string()),
        }
    }

    /// Returns true for PER, ORG, LOC and MISC.
    #[must_use]
    pub const fn is_proper(&self) -> bool {
        !matches!(self, EntityType::Other(_))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.as_label().to_string()
    }
}

/// Coarse part-of-speech tag of a head term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pos {
    /// Proper name
    Name,
    /// Common noun
    Noun,
    /// Pronoun
    Pron,
    /// Adjective
    Adj,
    /// Determiner
    Det,
    /// Punctuation
    Punct,
    /// Any other tag
    Other(String),
}

impl Pos {
    /// Tag string as it appears in the annotation layer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Pos::Name => "name",
            Pos::Noun => "noun",
            Pos::Pron => "pron",
            Pos::Adj => "adj",
            Pos::Det => "det",
            Pos::Punct => "punct",
            Pos::Other(s) => s.as_str(),
        }
    }

    /// Returns true for names and nouns.
    #[must_use]
    pub const fn is_nominal(&self) -> bool {
        matches!(self, Pos::Name | Pos::Noun)
    }
}

impl From<String> for Pos {
    fn from(tag: String) -> Self {
        match tag.to_lowercase().as_str() {
            "name" => Pos::Name,
            "noun" => Pos::Noun,
            "pron" => Pos::Pron,
            "adj" => Pos::Adj,
            "det" => Pos::Det,
            "punct" => Pos::Punct,
            _ => Pos::Other(tag),
        }
    }
}

impl From<&str> for Pos {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Pos> for String {
    fn from(pos: Pos) -> Self {
        pos.as_str().to_string()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Person {
    /// 1st person ("ik", "wij")
    #[serde(rename = "1")]
    First,
    /// 2nd person ("jij", "u")
    #[serde(rename = "2")]
    Second,
    /// 3rd person ("hij", "zij")
    #[serde(rename = "3")]
    Third,
}

// =============================================================================
// Mention
// =============================================================================

/// A candidate referring expression.
///
/// `span`, `relaxed_span`, `full_head` and the structural features all hold
/// token offsets; surface strings are looked up in the document's offset
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MentionRecord")]
pub struct Mention {
    /// Unique id.
    pub id: MentionId,
    /// Sorted, unique token offsets.
    pub span: Span,
    /// `span` without modifiers and appositives that follow the head.
    pub relaxed_span: Span,
    /// Multiword expression at the head.
    pub full_head: Span,
    /// Offset of the head term.
    pub head_offset: Offset,
    /// First character offset of the span.
    pub begin_offset: Offset,
    /// Character offset just past the span.
    pub end_offset: Offset,
    /// Part of speech of the head.
    pub head_pos: Option<Pos>,
    /// Grammatical number tag ("ev", "mv").
    pub number: Option<String>,
    /// Grammatical gender tag ("masc", "fem", "neut").
    pub gender: Option<String>,
    /// Grammatical person.
    pub person: Option<Person>,
    /// Named-entity type.
    pub entity_type: Option<EntityType>,
    /// Head is a relative pronoun.
    pub is_relative_pronoun: bool,
    /// Head is a reflexive pronoun.
    pub is_reflexive_pronoun: bool,
    /// Sentence of the head term.
    pub sentence_number: Option<u32>,
    /// Modifier spans.
    pub modifiers: Vec<Span>,
    /// Appositive spans.
    pub appositives: Vec<Span>,
    /// Predicative spans.
    pub predicatives: Vec<Span>,
    /// Offsets of the non-stopword terms in `span`.
    pub non_stopwords: Span,
    /// Offsets of the noun and adjective terms in `span`.
    pub main_modifiers: Span,
    /// Mentions this mention may never corefer with.
    pub coreference_prohibited: Vec<MentionId>,
}

impl Mention {
    /// Create a mention with the given span and head.
    ///
    /// The span is sorted and deduplicated. `relaxed_span` starts out equal
    /// to the span, `full_head` holds just the head, and the begin/end offsets
    /// are taken from the first and last span offsets.
    #[must_use]
    pub fn new(id: impl Into<MentionId>, span: impl IntoIterator<Item = Offset>, head_offset: Offset) -> Self {
        let span = normalize_span(span);
        let begin_offset = span.first().copied().unwrap_or(head_offset);
        let end_offset = span.last().copied().unwrap_or(head_offset);
        Self {
            id: id.into(),
            relaxed_span: span.clone(),
            full_head: vec![head_offset],
            span,
            head_offset,
            begin_offset,
            end_offset,
            head_pos: None,
            number: None,
            gender: None,
            person: None,
            entity_type: None,
            is_relative_pronoun: false,
            is_reflexive_pronoun: false,
            sentence_number: None,
            modifiers: Vec::new(),
            appositives: Vec::new(),
            predicatives: Vec::new(),
            non_stopwords: Vec::new(),
            main_modifiers: Vec::new(),
            coreference_prohibited: Vec::new(),
        }
    }

    /// Set the begin and end character offsets.
    #[must_use]
    pub fn with_offsets(mut self, begin: Offset, end: Offset) -> Self {
        self.begin_offset = begin;
        self.end_offset = end;
        self
    }

    /// Set the relaxed span.
    #[must_use]
    pub fn with_relaxed_span(mut self, span: impl IntoIterator<Item = Offset>) -> Self {
        self.relaxed_span = normalize_span(span);
        self
    }

    /// Set the full (multiword) head.
    #[must_use]
    pub fn with_full_head(mut self, span: impl IntoIterator<Item = Offset>) -> Self {
        self.full_head = normalize_span(span);
        self
    }

    /// Set the head part of speech.
    #[must_use]
    pub fn with_head_pos(mut self, pos: impl Into<Pos>) -> Self {
        self.head_pos = Some(pos.into());
        self
    }

    /// Set the grammatical number.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the grammatical gender.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the grammatical person.
    #[must_use]
    pub fn with_person(mut self, person: Person) -> Self {
        self.person = Some(person);
        self
    }

    /// Set the named-entity type.
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Set the sentence number.
    #[must_use]
    pub fn with_sentence(mut self, sentence: u32) -> Self {
        self.sentence_number = Some(sentence);
        self
    }

    /// Mark the head as a relative pronoun.
    #[must_use]
    pub fn relative_pronoun(mut self) -> Self {
        self.is_relative_pronoun = true;
        self
    }

    /// Mark the head as a reflexive pronoun.
    #[must_use]
    pub fn reflexive_pronoun(mut self) -> Self {
        self.is_reflexive_pronoun = true;
        self
    }

    /// Set the modifier spans.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<Span>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the appositive spans.
    #[must_use]
    pub fn with_appositives(mut self, appositives: Vec<Span>) -> Self {
        self.appositives = appositives;
        self
    }

    /// Set the predicative spans.
    #[must_use]
    pub fn with_predicatives(mut self, predicatives: Vec<Span>) -> Self {
        self.predicatives = predicatives;
        self
    }

    /// Set the non-stopword offsets.
    #[must_use]
    pub fn with_non_stopwords(mut self, offsets: impl IntoIterator<Item = Offset>) -> Self {
        self.non_stopwords = offsets.into_iter().collect();
        self
    }

    /// Set the main modifier offsets.
    #[must_use]
    pub fn with_main_modifiers(mut self, offsets: impl IntoIterator<Item = Offset>) -> Self {
        self.main_modifiers = offsets.into_iter().collect();
        self
    }

    /// Forbid coreference with the given mentions.
    #[must_use]
    pub fn with_prohibited(mut self, ids: impl IntoIterator<Item = MentionId>) -> Self {
        self.coreference_prohibited.extend(ids);
        self
    }

    /// Returns true if every offset of `self.span` lies in `offsets`.
    #[must_use]
    pub fn span_within(&self, offsets: &[Offset]) -> bool {
        self.span.iter().all(|o| offsets.contains(o))
    }

    /// Span with the gaps filled in.
    ///
    /// `full_content` lists every offset of the document in order. The
    /// returned span runs from the first to the last offset of this span,
    /// taking every document offset in between. Spans shorter than two
    /// offsets, or spans whose ends are not in `full_content`, come back
    /// unchanged.
    #[must_use]
    pub fn filled_span(&self, full_content: &[Offset]) -> Span {
        let (Some(first), Some(last)) = (self.span.first(), self.span.last()) else {
            return self.span.clone();
        };
        if self.span.len() < 2 {
            return self.span.clone();
        }
        let Some(start) = full_content.iter().position(|o| o == first) else {
            return self.span.clone();
        };
        match full_content[start..].iter().position(|o| o == last) {
            Some(len) => full_content[start..=start + len].to_vec(),
            None => self.span.clone(),
        }
    }
}

fn normalize_span(span: impl IntoIterator<Item = Offset>) -> Span {
    let mut span: Span = span.into_iter().collect();
    span.sort_unstable();
    span.dedup();
    span
}

/// Serialized form of a [`Mention`].
///
/// Only `id`, `span` and `head_offset` are required. A missing relaxed span
/// defaults to the span, a missing full head to the head, and missing
/// begin/end offsets to the span bounds.
#[derive(Debug, Clone, Deserialize)]
struct MentionRecord {
    id: MentionId,
    span: Span,
    head_offset: Offset,
    #[serde(default)]
    relaxed_span: Option<Span>,
    #[serde(default)]
    full_head: Option<Span>,
    #[serde(default)]
    begin_offset: Option<Offset>,
    #[serde(default)]
    end_offset: Option<Offset>,
    #[serde(default)]
    head_pos: Option<Pos>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    person: Option<Person>,
    #[serde(default)]
    entity_type: Option<EntityType>,
    #[serde(default)]
    is_relative_pronoun: bool,
    #[serde(default)]
    is_reflexive_pronoun: bool,
    #[serde(default)]
    sentence_number: Option<u32>,
    #[serde(default)]
    modifiers: Vec<Span>,
    #[serde(default)]
    appositives: Vec<Span>,
    #[serde(default)]
    predicatives: Vec<Span>,
    #[serde(default)]
    non_stopwords: Span,
    #[serde(default)]
    main_modifiers: Span,
    #[serde(default)]
    coreference_prohibited: Vec<MentionId>,
}

impl From<MentionRecord> for Mention {
    fn from(record: MentionRecord) -> Self {
        let mut mention = Mention::new(record.id, record.span, record.head_offset);
        if let Some(relaxed) = record.relaxed_span {
            mention = mention.with_relaxed_span(relaxed);
        }
        if let Some(full_head) = record.full_head {
            mention = mention.with_full_head(full_head);
        }
        if let Some(begin) = record.begin_offset {
            mention.begin_offset = begin;
        }
        if let Some(end) = record.end_offset {
            mention.end_offset = end;
        }
        mention.head_pos = record.head_pos;
        mention.number = record.number;
        mention.gender = record.gender;
        mention.person = record.person;
        mention.entity_type = record.entity_type;
        mention.is_relative_pronoun = record.is_relative_pronoun;
        mention.is_reflexive_pronoun = record.is_reflexive_pronoun;
        mention.sentence_number = record.sentence_number;
        mention.modifiers = record.modifiers;
        mention.appositives = record.appositives;
        mention.predicatives = record.predicatives;
        mention.non_stopwords = record.non_stopwords;
        mention.main_modifiers = record.main_modifiers;
        mention.coreference_prohibited = record.coreference_prohibited;
        mention
    }
}
