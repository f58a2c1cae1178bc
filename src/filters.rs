//! Single-mention filters, lifted to entities.
//!
//! Every filter is defined on a [`Mention`]. On an [`Entity`] it holds when it
//! holds for any member mention.

use multisieve_core::{Entity, Mention};

/// Mention filters available on both mentions and entities.
pub trait Filters {
    /// Returns true if the predicate holds for some member mention.
    fn any_mention(&self, pred: impl Fn(&Mention) -> bool) -> bool;

    /// Head is a name or a noun.
    fn is_nominal(&self) -> bool {
        self.any_mention(|m| m.head_pos.as_ref().is_some_and(|p| p.is_nominal()))
    }

    /// An entity type was assigned.
    fn is_named_entity(&self) -> bool {
        self.any_mention(|m| m.entity_type.is_some())
    }

    /// Entity type is PER, ORG, LOC or MISC.
    fn is_proper_noun(&self) -> bool {
        self.any_mention(|m| m.entity_type.as_ref().is_some_and(|t| t.is_proper()))
    }

    /// Head is a pronoun.
    fn is_pronoun(&self) -> bool {
        self.any_mention(|m| matches!(m.head_pos, Some(multisieve_core::Pos::Pron)))
    }
}

impl Filters for Mention {
    fn any_mention(&self, pred: impl Fn(&Mention) -> bool) -> bool {
        pred(self)
    }
}

impl Filters for Entity {
    fn any_mention(&self, pred: impl Fn(&Mention) -> bool) -> bool {
        self.iter().any(pred)
    }
}

/// Returns true if every mention of the entity is a pronoun.
pub fn only_pronouns(entity: &Entity) -> bool {
    entity.iter().all(|m| m.is_pronoun())
}

/// Entity-level [`Filters::is_nominal`], usable as a candidate filter.
pub fn nominal(entity: &Entity) -> bool {
    entity.is_nominal()
}

/// Entity-level [`Filters::is_named_entity`], usable as a candidate filter.
pub fn named_entity(entity: &Entity) -> bool {
    entity.is_named_entity()
}

/// Entity-level [`Filters::is_proper_noun`], usable as a candidate filter.
pub fn proper_noun(entity: &Entity) -> bool {
    entity.is_proper_noun()
}
