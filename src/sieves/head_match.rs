//! Sieves 5 to 9: head matching.
//!
//! Strict head match comes in three variants that relax one constraint each.
//! Proper head word match and relaxed head match handle names.

use super::{MarkDisjoint, Sieve, SieveContext};
use crate::constraints::{
    compatible_modifiers_only, head_words_match, not_i_within_i, words_included,
};
use crate::document::OffsetStrings;
use crate::error::Result;
use crate::filters::{named_entity, Filters};
use multisieve_core::{Candidates, Entity, EntityId, EntityRef, Mention};
use std::collections::HashSet;

// =============================================================================
// Strict head match
// =============================================================================

/// Which constraints a [`StrictHeadMatch`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrictHeadVariant {
    /// Head match, word inclusion, compatible modifiers, not i-within-i.
    Full,
    /// Drops the compatible-modifiers constraint.
    WithoutCompatibleModifiers,
    /// Drops the word-inclusion constraint.
    WithoutWordInclusion,
}

/// Merges entities whose heads agree, under the constraints of its variant.
///
/// Only non-pronoun mentions of the entity take part in the head and
/// word-inclusion checks.
#[derive(Debug, Clone, Copy)]
pub struct StrictHeadMatch {
    variant: StrictHeadVariant,
}

impl StrictHeadMatch {
    /// Create the sieve for one variant.
    pub fn new(variant: StrictHeadVariant) -> Self {
        Self { variant }
    }

    /// The enforced variant.
    pub fn variant(&self) -> StrictHeadVariant {
        self.variant
    }

    fn accepts(&self, candidate: &Entity, subject: &[&Mention], words: &OffsetStrings) -> bool {
        if !head_words_match(candidate.iter(), subject.iter().copied(), words) {
            return false;
        }
        if self.variant != StrictHeadVariant::WithoutWordInclusion
            && !words_included(candidate.iter(), subject.iter().copied(), words)
        {
            return false;
        }
        let pairs = || {
            candidate
                .iter()
                .flat_map(|a| subject.iter().map(move |&m| (a, m)))
        };
        if !pairs().any(|(a, m)| not_i_within_i(a, m)) {
            return false;
        }
        self.variant == StrictHeadVariant::WithoutCompatibleModifiers
            || pairs().any(|(a, m)| compatible_modifiers_only(a, m, words))
    }
}

impl Sieve for StrictHeadMatch {
    fn name(&self) -> &'static str {
        match self.variant {
            StrictHeadVariant::Full => "strict-head-match",
            StrictHeadVariant::WithoutCompatibleModifiers => "strict-head-match-no-modifiers",
            StrictHeadVariant::WithoutWordInclusion => "strict-head-match-no-word-inclusion",
        }
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        mut candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        let subject: Vec<&Mention> = entity.iter().filter(|m| !m.is_pronoun()).collect();
        if subject.is_empty() {
            return Ok(None);
        }
        Ok(candidates
            .find(|c| self.accepts(c, &subject, ctx.words))
            .map(|c| c.id))
    }
}

// =============================================================================
// Proper head word match
// =============================================================================

/// Tokens made of ASCII digits only.
fn numbers<'w>(mention: &'w Mention, words: &'w OffsetStrings) -> HashSet<&'w str> {
    words
        .words(&mention.span)
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

/// Merges proper names with the same full head, unless the later one
/// mentions a number the earlier one does not.
///
/// Both sides of a pair must be proper nouns, so only the entity's
/// proper-noun mentions are tried against the candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProperHeadWordMatch;

impl ProperHeadWordMatch {
    fn mentions_match(antecedent: &Mention, mention: &Mention, words: &OffsetStrings) -> bool {
        if !antecedent.is_proper_noun() || !not_i_within_i(antecedent, mention) {
            return false;
        }
        let head = words.render(&mention.full_head);
        if head.is_empty() || head != words.render(&antecedent.full_head) {
            return false;
        }
        numbers(mention, words).is_subset(&numbers(antecedent, words))
    }
}

impl Sieve for ProperHeadWordMatch {
    fn name(&self) -> &'static str {
        "proper-head-word-match"
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        if !entity.is_proper_noun() {
            return Ok(None);
        }
        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        for mention in entity.iter().filter(|m| m.is_proper_noun()) {
            for candidate in &candidates {
                if candidate
                    .iter()
                    .any(|a| Self::mentions_match(a, mention, ctx.words))
                {
                    return Ok(Some(candidate.id));
                }
            }
        }
        Ok(None)
    }
}

// =============================================================================
// Relaxed head match
// =============================================================================

/// Merges a named mention into an entity whose mention contains all of its
/// head words, if both carry the same entity type.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedHeadMatch;

impl RelaxedHeadMatch {
    fn mentions_match(antecedent: &Mention, mention: &Mention, words: &OffsetStrings) -> bool {
        if antecedent.entity_type.is_none() || antecedent.entity_type != mention.entity_type {
            return false;
        }
        if !not_i_within_i(antecedent, mention) {
            return false;
        }
        let container: HashSet<&str> = words.words(&antecedent.span).collect();
        let mut head = words.words(&mention.full_head).peekable();
        head.peek().is_some() && head.all(|w| container.contains(w))
    }
}

impl Sieve for RelaxedHeadMatch {
    fn name(&self) -> &'static str {
        "relaxed-head-match"
    }

    fn candidate_filter(&self) -> Option<fn(&Entity) -> bool> {
        Some(named_entity)
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        mut candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        if !entity.is_named_entity() {
            return Ok(None);
        }
        let words = ctx.words;
        Ok(candidates
            .find(|candidate| {
                let pair_matches = entity
                    .iter()
                    .filter(|m| m.is_named_entity())
                    .any(|m| candidate.iter().any(|a| Self::mentions_match(a, m, words)));
                pair_matches && words_included(candidate.iter(), entity.iter(), words)
            })
            .map(|c| c.id))
    }
}
