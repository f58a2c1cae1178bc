//! Sieve 4: precise constructs.
//!
//! Syntactic constructions that reliably signal coreference. They are tried
//! in a fixed order and the first one that finds an antecedent wins.

use super::{MarkDisjoint, Sieve, SieveContext};
use crate::error::Result;
use crate::filters::Filters;
use multisieve_core::{Candidates, Entity, EntityId, EntityRef, Mention, Span};

/// One precise construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreciseConstruct {
    /// "Jan, de bakker": an appositive span equals the other mention's span.
    Appositive,
    /// "Jan is de bakker": a predicative span equals the other mention's span.
    Predicative,
    /// "de man die ...": a relative pronoun inside a modifier of its antecedent.
    RelativePronoun,
    /// "Agence France Presse (AFP)": one name listed among the other's modifiers.
    Acronym,
    /// "Jan wast zich": a reflexive pronoun and an earlier mention of its sentence.
    ReflexivePronoun,
}

impl PreciseConstruct {
    /// All constructions, in the order they are tried.
    pub const ALL: [PreciseConstruct; 5] = [
        PreciseConstruct::Appositive,
        PreciseConstruct::Predicative,
        PreciseConstruct::RelativePronoun,
        PreciseConstruct::Acronym,
        PreciseConstruct::ReflexivePronoun,
    ];

    /// Find an antecedent for `entity` among `candidates`.
    pub fn find(self, entity: &Entity, candidates: &[EntityRef<'_>]) -> Option<EntityId> {
        match self {
            PreciseConstruct::Appositive => {
                span_listed_either_way(entity, candidates, |m| &m.appositives)
            }
            PreciseConstruct::Predicative => {
                span_listed_either_way(entity, candidates, |m| &m.predicatives)
            }
            PreciseConstruct::RelativePronoun => relative_pronoun(entity, candidates),
            PreciseConstruct::Acronym => acronym(entity, candidates),
            PreciseConstruct::ReflexivePronoun => reflexive_pronoun(entity, candidates),
        }
    }
}

fn lists_span(lister: &Mention, spans: impl Fn(&Mention) -> &[Span], target: &Mention) -> bool {
    spans(lister).iter().any(|s| s == &target.span)
}

/// A mention of one side has the span of a mention of the other side among
/// its `spans`. Candidates are tried in order.
fn span_listed_either_way(
    entity: &Entity,
    candidates: &[EntityRef<'_>],
    spans: impl Fn(&Mention) -> &[Span] + Copy,
) -> Option<EntityId> {
    candidates
        .iter()
        .find(|candidate| {
            entity.iter().any(|m| {
                candidate
                    .iter()
                    .any(|c| lists_span(m, spans, c) || lists_span(c, spans, m))
            })
        })
        .map(|c| c.id)
}

/// The candidate mention with a modifier containing the relative pronoun's
/// head. When several qualify, the one whose head is closest before the
/// pronoun wins.
fn relative_pronoun(entity: &Entity, candidates: &[EntityRef<'_>]) -> Option<EntityId> {
    let mut best: Option<(u32, EntityId)> = None;
    for pronoun in entity.iter().filter(|m| m.is_relative_pronoun) {
        let head = pronoun.head_offset;
        for candidate in candidates {
            for m in candidate.iter() {
                if !m.modifiers.iter().any(|modifier| modifier.contains(&head)) {
                    continue;
                }
                let distance = head.abs_diff(m.head_offset);
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, candidate.id));
                }
            }
        }
    }
    best.map(|(_, id)| id)
}

/// Both sides are proper names and a span of one is a modifier of the other.
fn acronym(entity: &Entity, candidates: &[EntityRef<'_>]) -> Option<EntityId> {
    if !entity.is_proper_noun() {
        return None;
    }
    candidates
        .iter()
        .filter(|c| c.is_proper_noun())
        .find(|candidate| {
            entity.iter().filter(|m| m.is_proper_noun()).any(|m| {
                candidate.iter().filter(|c| c.is_proper_noun()).any(|c| {
                    lists_span(m, |x| &x.modifiers, c) || lists_span(c, |x| &x.modifiers, m)
                })
            })
        })
        .map(|c| c.id)
}

/// An earlier mention in the reflexive pronoun's sentence that does not
/// contain the pronoun.
fn reflexive_pronoun(entity: &Entity, candidates: &[EntityRef<'_>]) -> Option<EntityId> {
    for pronoun in entity.iter().filter(|m| m.is_reflexive_pronoun) {
        let Some(sentence) = pronoun.sentence_number else {
            continue;
        };
        let head = pronoun.head_offset;
        for candidate in candidates {
            let found = candidate.iter().any(|m| {
                m.sentence_number == Some(sentence)
                    && !m.span.contains(&head)
                    && m.head_offset < head
            });
            if found {
                return Some(candidate.id);
            }
        }
    }
    None
}

/// Tries the precise constructions in order.
#[derive(Debug, Clone)]
pub struct PreciseConstructs {
    constructs: Vec<PreciseConstruct>,
}

impl PreciseConstructs {
    /// Use only the given constructions, in the given order.
    pub fn with_constructs(constructs: impl IntoIterator<Item = PreciseConstruct>) -> Self {
        Self {
            constructs: constructs.into_iter().collect(),
        }
    }
}

impl Default for PreciseConstructs {
    fn default() -> Self {
        Self::with_constructs(PreciseConstruct::ALL)
    }
}

impl Sieve for PreciseConstructs {
    fn name(&self) -> &'static str {
        "precise-constructs"
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        _ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        for construct in &self.constructs {
            if let Some(found) = construct.find(&entity, &candidates) {
                log::trace!("{construct:?} construction links {}", entity.entity);
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}
