//! The sieves: ordered, deterministic matching rules.
//!
//! A sieve looks at one entity and its candidate antecedents and returns the
//! candidate it should merge with, if any. It never mutates the collection;
//! the only side effect available to it is the `mark_disjoint` callback,
//! which forbids the current entity from ever merging with another one.
//!
//! | # | Sieve | Type |
//! |---|-------|------|
//! | 1 | Speaker identification | [`SpeakerIdentification`] |
//! | 2 | Exact string match | [`ExactStringMatch`] |
//! | 3 | Relaxed string match | [`RelaxedStringMatch`] |
//! | 4 | Precise constructs | [`PreciseConstructs`] |
//! | 5-7 | Strict head match | [`StrictHeadMatch`] |
//! | 8 | Proper head word match | [`ProperHeadWordMatch`] |
//! | 9 | Relaxed head match | [`RelaxedHeadMatch`] |
//! | 10 | Pronoun resolution | [`PronounResolution`] |

mod head_match;
mod precise;
mod pronoun;
mod speaker;
mod string_match;

pub use head_match::{ProperHeadWordMatch, RelaxedHeadMatch, StrictHeadMatch, StrictHeadVariant};
pub use precise::{PreciseConstruct, PreciseConstructs};
pub use pronoun::PronounResolution;
pub use speaker::SpeakerIdentification;
pub use string_match::{ExactStringMatch, RelaxedStringMatch};

use crate::document::OffsetStrings;
use crate::error::Result;
use crate::quotation::Quotation;
use multisieve_core::{Candidates, Entities, Entity, EntityId, EntityRef};

/// Default sentence window of the pronoun sieve.
pub const DEFAULT_MAX_PRONOUN_DISTANCE: u32 = 3;

/// Read-only document state shared by all sieves of one run.
#[derive(Debug, Clone, Copy)]
pub struct SieveContext<'a> {
    /// The collection being resolved.
    pub entities: &'a Entities,
    /// Surface string of every token offset.
    pub words: &'a OffsetStrings,
    /// Direct-speech quotations, in the order they are tried.
    pub quotations: &'a [Quotation],
    /// Sentence window of the pronoun sieve.
    pub max_pronoun_distance: u32,
}

/// Callback that forbids the current entity from merging with another.
pub type MarkDisjoint<'m> = dyn FnMut(EntityId) -> Result<()> + 'm;

/// One heuristic pass of the resolver.
pub trait Sieve: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Cheap filter applied to candidates before the disjointness check.
    fn candidate_filter(&self) -> Option<fn(&Entity) -> bool> {
        None
    }

    /// Pick the antecedent `entity` should merge with.
    ///
    /// `candidates` yields the merge-allowed entities before `entity`, in
    /// document order. Returning `Ok(None)` means no match.
    fn resolve<'a>(
        &self,
        entity: EntityRef<'a>,
        candidates: Candidates<'a>,
        mark_disjoint: &mut MarkDisjoint<'_>,
        ctx: &SieveContext<'a>,
    ) -> Result<Option<EntityId>>;
}

/// The ten sieves in their fixed order.
pub fn default_sieves() -> Vec<Box<dyn Sieve>> {
    vec![
        Box::new(SpeakerIdentification),
        Box::new(ExactStringMatch),
        Box::new(RelaxedStringMatch),
        Box::new(PreciseConstructs::default()),
        Box::new(StrictHeadMatch::new(StrictHeadVariant::Full)),
        Box::new(StrictHeadMatch::new(StrictHeadVariant::WithoutCompatibleModifiers)),
        Box::new(StrictHeadMatch::new(StrictHeadVariant::WithoutWordInclusion)),
        Box::new(ProperHeadWordMatch),
        Box::new(RelaxedHeadMatch),
        Box::new(PronounResolution),
    ]
}
