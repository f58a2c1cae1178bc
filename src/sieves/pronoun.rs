//! Sieve 10: pronoun resolution.

use super::{MarkDisjoint, Sieve, SieveContext};
use crate::constraints::is_compatible;
use crate::error::Result;
use crate::filters::only_pronouns;
use multisieve_core::{Candidates, Entity, EntityId, EntityRef, EntityType, Mention, Person};
use std::collections::HashSet;
use std::hash::Hash;

/// Links a pronoun entity to the closest earlier entity that agrees with it.
///
/// A candidate must have a mention within `max_pronoun_distance` sentences
/// of the pronoun and be compatible in number, gender, person and entity
/// type. Unknown features are compatible with anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounResolution;

/// Feature values of an entity, empty when no member has one.
fn feature<T, F>(entity: &Entity, name: &'static str, get: F) -> Result<HashSet<T>>
where
    T: Eq + Hash,
    F: Fn(&Mention) -> Option<T>,
{
    match entity.mention_attr(name, get) {
        Ok(values) => Ok(values),
        Err(e) if e.is_missing_attribute() => Ok(HashSet::new()),
        Err(e) => Err(e.into()),
    }
}

/// The agreement features compared between a pronoun and its antecedent.
struct Agreement {
    number: HashSet<String>,
    gender: HashSet<String>,
    person: HashSet<Person>,
    entity_type: HashSet<EntityType>,
}

impl Agreement {
    fn of(entity: &Entity) -> Result<Self> {
        Ok(Self {
            number: feature(entity, "number", |m| m.number.clone())?,
            gender: feature(entity, "gender", |m| m.gender.clone())?,
            person: feature(entity, "person", |m| m.person)?,
            entity_type: feature(entity, "entity_type", |m| m.entity_type.clone())?,
        })
    }

    fn compatible(&self, other: &Agreement) -> bool {
        is_compatible(&self.number, &other.number)
            && is_compatible(&self.gender, &other.gender)
            && is_compatible(&self.person, &other.person)
            && is_compatible(&self.entity_type, &other.entity_type)
    }
}

impl Sieve for PronounResolution {
    fn name(&self) -> &'static str {
        "pronoun-resolution"
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        if !only_pronouns(&entity) {
            return Ok(None);
        }
        let sentences = feature(&entity, "sentence_number", |m| m.sentence_number)?;
        let (Some(&first), Some(&last)) = (sentences.iter().min(), sentences.iter().max()) else {
            return Ok(None);
        };
        let window = first.saturating_sub(ctx.max_pronoun_distance)
            ..=last.saturating_add(ctx.max_pronoun_distance);
        let agreement = Agreement::of(&entity)?;

        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        for candidate in candidates.iter().rev() {
            let near = candidate
                .iter()
                .filter_map(|m| m.sentence_number)
                .any(|s| window.contains(&s));
            if near && Agreement::of(candidate)?.compatible(&agreement) {
                return Ok(Some(candidate.id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::OffsetStrings;
    use crate::sieves::testing::run_sieve;
    use multisieve_core::Pos;

    fn hij(id: u32, offset: u32, sentence: u32) -> Mention {
        Mention::new(id, [offset], offset)
            .with_head_pos(Pos::Pron)
            .with_sentence(sentence)
            .with_gender("masc")
            .with_number("ev")
            .with_person(Person::Third)
    }

    #[test]
    fn links_to_closest_agreeing_entity() {
        // Jan (s4) ... Marie (s4) ... hij (s5)
        let mentions = vec![
            Mention::new(0, [0], 0)
                .with_head_pos(Pos::Name)
                .with_sentence(4)
                .with_gender("masc")
                .with_entity_type(EntityType::Person),
            Mention::new(1, [10], 10)
                .with_head_pos(Pos::Name)
                .with_sentence(4)
                .with_gender("fem")
                .with_entity_type(EntityType::Person),
            hij(2, 20, 5),
        ];
        let groups = run_sieve(&PronounResolution, mentions, &OffsetStrings::new(), &[]);
        assert_eq!(groups, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn unknown_features_are_compatible() {
        let mentions = vec![
            Mention::new(0, [0], 0).with_head_pos(Pos::Noun).with_sentence(1),
            Mention::new(1, [5], 5).with_head_pos(Pos::Noun).with_sentence(1),
            hij(2, 10, 2),
        ];
        let groups = run_sieve(&PronounResolution, mentions, &OffsetStrings::new(), &[]);
        assert_eq!(groups, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn respects_sentence_window() {
        let mentions = vec![
            Mention::new(0, [0], 0).with_head_pos(Pos::Name).with_sentence(1),
            hij(1, 100, 5),
        ];
        let groups = run_sieve(&PronounResolution, mentions, &OffsetStrings::new(), &[]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn pronoun_without_sentence_is_left_alone() {
        let mentions = vec![
            Mention::new(0, [0], 0).with_head_pos(Pos::Name).with_sentence(1),
            Mention::new(1, [5], 5).with_head_pos(Pos::Pron),
        ];
        let groups = run_sieve(&PronounResolution, mentions, &OffsetStrings::new(), &[]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn pronouns_can_chain() {
        let mentions = vec![
            Mention::new(0, [0], 0).with_head_pos(Pos::Name).with_sentence(1),
            hij(1, 10, 2),
            hij(2, 20, 3),
        ];
        let groups = run_sieve(&PronounResolution, mentions, &OffsetStrings::new(), &[]);
        assert_eq!(groups, vec![vec![0, 1, 2]]);
    }
}
