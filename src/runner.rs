//! Drives sieves over a live entity collection.

use crate::document::OffsetStrings;
use crate::error::{Error, Result};
use crate::quotation::Quotation;
use crate::sieves::{Sieve, SieveContext, DEFAULT_MAX_PRONOUN_DISTANCE};
use multisieve_core::{CandidateFilter, Entities, EntityId, EntityRef};

/// Runs sieves over every active entity in document order.
///
/// Iteration follows positions, not a snapshot: an entity merged away
/// earlier in the same pass is skipped, and a surviving entity is seen with
/// the mentions it absorbed.
pub struct SieveRunner<'a> {
    entities: &'a mut Entities,
    words: &'a OffsetStrings,
    quotations: &'a [Quotation],
    max_pronoun_distance: u32,
}

impl<'a> SieveRunner<'a> {
    /// Create a runner over a collection and its token table.
    pub fn new(entities: &'a mut Entities, words: &'a OffsetStrings) -> Self {
        Self {
            entities,
            words,
            quotations: &[],
            max_pronoun_distance: DEFAULT_MAX_PRONOUN_DISTANCE,
        }
    }

    /// Set the quotations used by speaker identification.
    pub fn with_quotations(mut self, quotations: &'a [Quotation]) -> Self {
        self.quotations = quotations;
        self
    }

    /// Set the sentence window of the pronoun sieve.
    pub fn with_max_pronoun_distance(mut self, distance: u32) -> Self {
        self.max_pronoun_distance = distance;
        self
    }

    /// Run one sieve over all entities. Returns the number of merges.
    pub fn run(&mut self, sieve: &dyn Sieve) -> Result<usize> {
        let mut merges = 0;
        let mut position = 0;
        while position < self.entities.slot_count() {
            let current = self.entities.id_at(position);
            position += 1;
            let Some(id) = current else {
                continue;
            };
            if let Some(matched) = self.find_match(sieve, id)? {
                log::debug!(
                    "[{}] {} matched {}",
                    sieve.name(),
                    describe(self.entities, id),
                    describe(self.entities, matched)
                );
                self.entities.merge(matched, id)?;
                merges += 1;
            }
        }
        Ok(merges)
    }

    /// Run sieves in order.
    pub fn run_all(&mut self, sieves: &[Box<dyn Sieve>]) -> Result<()> {
        for sieve in sieves {
            let merges = self.run(sieve.as_ref())?;
            log::info!(
                "Sieve {}: {} merges, {} entities left",
                sieve.name(),
                merges,
                self.entities.len()
            );
        }
        Ok(())
    }

    fn find_match(&self, sieve: &dyn Sieve, id: EntityId) -> Result<Option<EntityId>> {
        let entities: &Entities = &*self.entities;
        let Some(entity) = entities.get(id) else {
            return Ok(None);
        };
        let filter = sieve.candidate_filter();
        let filter: Option<CandidateFilter<'_>> = filter.as_ref().map(|f| f as CandidateFilter<'_>);
        let candidates = entities.get_candidates(id, filter)?;
        let ctx = SieveContext {
            entities,
            words: self.words,
            quotations: self.quotations,
            max_pronoun_distance: self.max_pronoun_distance,
        };
        let mut mark_disjoint = |other: EntityId| -> Result<()> {
            entities.mark_disjoint(id, other).map_err(Error::from)
        };
        sieve.resolve(EntityRef { id, entity }, candidates, &mut mark_disjoint, &ctx)
    }
}

fn describe(entities: &Entities, id: EntityId) -> String {
    entities
        .get(id)
        .map_or_else(|| id.to_string(), ToString::to_string)
}
