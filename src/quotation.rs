//! Direct-speech quotations and their participants.

use multisieve_core::{Entity, MentionId, Offset};
use serde::{Deserialize, Serialize};

/// A span of direct speech.
///
/// `source` is the speaker, `addressee` the person spoken to and `topic`
/// the person spoken about. Each is the id of a mention, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Token offsets of the quoted text.
    pub span: Vec<Offset>,
    /// Speaker mention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MentionId>,
    /// Addressee mention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressee: Option<MentionId>,
    /// Topic mention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<MentionId>,
}

impl Quotation {
    /// Create a quotation over the given offsets.
    pub fn new(span: impl IntoIterator<Item = Offset>) -> Self {
        let mut span: Vec<Offset> = span.into_iter().collect();
        span.sort_unstable();
        span.dedup();
        Self {
            span,
            ..Self::default()
        }
    }

    /// Set the speaker.
    pub fn with_source(mut self, source: MentionId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the addressee.
    pub fn with_addressee(mut self, addressee: MentionId) -> Self {
        self.addressee = Some(addressee);
        self
    }

    /// Set the topic.
    pub fn with_topic(mut self, topic: MentionId) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Returns true if the offset lies in the quoted text.
    pub fn contains_offset(&self, offset: Offset) -> bool {
        self.span.binary_search(&offset).is_ok()
    }

    /// Returns true if every mention of the entity lies in the quoted text.
    pub fn contains_entity(&self, entity: &Entity) -> bool {
        entity
            .iter()
            .all(|m| m.span.iter().all(|&o| self.contains_offset(o)))
    }

    /// Returns true if the mention is the source, addressee or topic.
    pub fn has_participant(&self, mention: MentionId) -> bool {
        [self.source, self.addressee, self.topic].contains(&Some(mention))
    }
}
