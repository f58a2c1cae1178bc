//! Sieve 1: speaker identification.

use super::{MarkDisjoint, Sieve, SieveContext};
use crate::error::Result;
use crate::filters::only_pronouns;
use crate::quotation::Quotation;
use multisieve_core::{Candidates, Entity, EntityId, EntityRef, MentionId, Person};

/// Links pronouns in direct speech to the quotation's participants.
///
/// For an all-pronoun entity inside a quotation, the grammatical person
/// picks the participant it refers to:
///
/// | Person | Merge with | Disjoint from |
/// |--------|-----------|---------------|
/// | 1st | source | topic, addressee |
/// | 2nd | addressee | source, topic |
/// | 3rd | topic | source, addressee |
///
/// Any other entity inside a quotation is marked disjoint from the source.
/// Only the first quotation containing the entity is used.
///
/// A participant introduced after the quotation ("... ik kom," zei Jan) is
/// linked when the participant's own entity is processed. Until then, the
/// pronouns of the quotation that refer to it gather in the earliest one, so
/// the participant absorbs all of them with a single merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerIdentification;

/// The participant a pronoun of the given person refers to, and the ones it
/// cannot refer to.
fn roles(quote: &Quotation, person: Person) -> (Option<MentionId>, [Option<MentionId>; 2]) {
    match person {
        Person::First => (quote.source, [quote.topic, quote.addressee]),
        Person::Second => (quote.addressee, [quote.source, quote.topic]),
        Person::Third => (quote.topic, [quote.source, quote.addressee]),
    }
}

/// Person of the first member mention that has one.
fn person_of(entity: &Entity) -> Option<Person> {
    entity.iter().find_map(|m| m.person)
}

impl SpeakerIdentification {
    fn mark_participant(
        entity: EntityRef<'_>,
        participant: MentionId,
        mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'_>,
    ) -> Result<()> {
        if entity.contains(participant) {
            return Ok(());
        }
        match ctx.entities.find_mention(participant) {
            Some(other) if other != entity.id => mark_disjoint(other),
            Some(_) => Ok(()),
            None => {
                log::warn!("Quotation participant {participant} is not in any entity");
                Ok(())
            }
        }
    }

    /// Returns true if `participant` belongs to an entity after `entity`.
    fn introduced_later(entity: EntityRef<'_>, participant: MentionId, ctx: &SieveContext<'_>) -> bool {
        let Some(other) = ctx.entities.find_mention(participant) else {
            return false;
        };
        match (ctx.entities.position(entity.id), ctx.entities.position(other)) {
            (Some(here), Some(there)) => there > here,
            _ => false,
        }
    }

    /// The entity is inside `quote`.
    fn resolve_quoted<'a>(
        entity: EntityRef<'a>,
        quote: &Quotation,
        candidates: Candidates<'a>,
        mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        if !only_pronouns(&entity) {
            if let Some(source) = quote.source {
                Self::mark_participant(entity, source, mark_disjoint, ctx)?;
            }
            return Ok(None);
        }
        let Some(person) = person_of(&entity) else {
            return Ok(None);
        };
        let (target, excluded) = roles(quote, person);
        for participant in excluded.into_iter().flatten() {
            Self::mark_participant(entity, participant, mark_disjoint, ctx)?;
        }
        let Some(target) = target else {
            return Ok(None);
        };
        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        if let Some(found) = candidates.iter().find(|c| c.contains(target)) {
            return Ok(Some(found.id));
        }
        if !Self::introduced_later(entity, target, ctx) {
            return Ok(None);
        }
        let sibling = candidates.iter().find(|c| {
            only_pronouns(c)
                && ctx
                    .quotations
                    .iter()
                    .find(|q| q.contains_entity(c))
                    .is_some_and(|q| std::ptr::eq(q, quote))
                && person_of(c).is_some_and(|p| roles(quote, p).0 == Some(target))
        });
        Ok(sibling.map(|c| c.id))
    }

    /// The entity holds a participant of some quotation; look for an earlier
    /// pronoun entity in that quotation that refers to it.
    fn resolve_participant<'a>(
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        ctx: &SieveContext<'a>,
    ) -> Option<EntityId> {
        let quotes: Vec<&Quotation> = ctx
            .quotations
            .iter()
            .filter(|q| entity.mention_ids().any(|id| q.has_participant(id)))
            .collect();
        if quotes.is_empty() {
            return None;
        }
        for candidate in candidates {
            if !only_pronouns(&candidate) {
                continue;
            }
            // Only the first quotation containing the pronoun counts.
            let Some(quote) = ctx.quotations.iter().find(|q| q.contains_entity(&candidate)) else {
                continue;
            };
            if !quotes.iter().any(|q| std::ptr::eq(*q, quote)) {
                continue;
            }
            let Some(person) = person_of(&candidate) else {
                continue;
            };
            if let (Some(target), _) = roles(quote, person) {
                if entity.contains(target) {
                    return Some(candidate.id);
                }
            }
        }
        None
    }
}

impl Sieve for SpeakerIdentification {
    fn name(&self) -> &'static str {
        "speaker-identification"
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        if let Some(quote) = ctx.quotations.iter().find(|q| q.contains_entity(&entity)) {
            return Self::resolve_quoted(entity, quote, candidates, mark_disjoint, ctx);
        }
        Ok(Self::resolve_participant(entity, candidates, ctx))
    }
}
