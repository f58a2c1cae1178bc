//! Sieves 2 and 3: exact and relaxed string match.

use super::{MarkDisjoint, Sieve, SieveContext};
use crate::error::Result;
use crate::filters::{nominal, Filters};
use multisieve_core::{Candidates, Entity, EntityId, EntityRef, Mention, Offset};

/// First candidate holding a mention whose rendered span equals the rendered
/// span of some subject mention. Iterates subject mentions, then
/// candidates, then candidate mentions.
fn first_string_match<'a>(
    subject: &[&Mention],
    candidates: &[EntityRef<'a>],
    ctx: &SieveContext<'a>,
    span_of: impl Fn(&Mention) -> &[Offset],
    usable: impl Fn(&Mention) -> bool,
) -> Option<EntityId> {
    for &mention in subject {
        let text = ctx.words.render(span_of(mention));
        if text.is_empty() {
            continue;
        }
        for candidate in candidates {
            let matched = candidate
                .iter()
                .filter(|&m| usable(m))
                .any(|m| ctx.words.render(span_of(m)) == text);
            if matched {
                return Some(candidate.id);
            }
        }
    }
    None
}

/// Merges entities sharing a mention with the same surface string.
///
/// Pronoun mentions take no part on either side.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactStringMatch;

impl Sieve for ExactStringMatch {
    fn name(&self) -> &'static str {
        "exact-string-match"
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        let subject: Vec<&Mention> = entity.iter().filter(|m| !m.is_pronoun()).collect();
        if subject.is_empty() {
            return Ok(None);
        }
        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        Ok(first_string_match(
            &subject,
            &candidates,
            ctx,
            |m| &m.span,
            |m| !m.is_pronoun(),
        ))
    }
}

/// Like [`ExactStringMatch`], on relaxed spans of nominal mentions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedStringMatch;

impl Sieve for RelaxedStringMatch {
    fn name(&self) -> &'static str {
        "relaxed-string-match"
    }

    fn candidate_filter(&self) -> Option<fn(&Entity) -> bool> {
        Some(nominal)
    }

    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        _mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>> {
        let subject: Vec<&Mention> = entity.iter().filter(|m| m.is_nominal()).collect();
        if subject.is_empty() {
            return Ok(None);
        }
        let candidates: Vec<EntityRef<'a>> = candidates.collect();
        Ok(first_string_match(
            &subject,
            &candidates,
            ctx,
            |m| &m.relaxed_span,
            |m| m.is_nominal(),
        ))
    }
}
