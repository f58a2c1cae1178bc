//! Mention extraction from term-level documents.
//!
//! Turns a [`TermDocument`] into a [`MentionDocument`]:
//!
//! 1. Every noun, pronoun, name and possessive determiner heads a candidate
//!    whose span is its dependency constituent.
//! 2. Every named entity adds a candidate headed inside its span; nested
//!    annotations give way to the largest span.
//! 3. Candidates get their features (modifiers, appositives, predicatives,
//!    non-stopwords, morphology, ...), duplicates sharing a head or a span
//!    are merged, and the rest are numbered in document order.
//! 4. Quotations are taken from the document or detected from quote marks,
//!    and their participants linked to mentions.
//!
//! All lookups live in a per-call [`DependencyIndex`]; nothing is shared
//! between documents.

mod dependency;
mod mentions;
mod morphology;
mod quotes;
mod terms;

pub use dependency::DependencyIndex;
pub use morphology::Morphology;
pub use terms::{Dependency, NamedEntity, QuotationAnnotation, Term, TermDocument, TermType};

use crate::document::{MentionDocument, OffsetStrings};
use crate::error::Result;
use crate::lang::Stopwords;
use mentions::{build_mention, entity_candidates, head_candidates, merge_duplicates};
use multisieve_core::Mention;
use quotes::TermQuotation;
use terms::TermIndex;

/// Extract mentions, token strings and quotations from a term document.
///
/// # Errors
///
/// Returns [`crate::Error::Extraction`] if a dependency or annotation names
/// a term that does not exist, or if term ids repeat.
pub fn extract_mentions(doc: &TermDocument, stopwords: &Stopwords) -> Result<MentionDocument> {
    let index = TermIndex::new(&doc.terms)?;
    let deps = DependencyIndex::build(&index, &doc.dependencies)?;

    let mut candidates = head_candidates(&index, &deps);
    let head_count = candidates.len();
    candidates.extend(entity_candidates(&doc.entities, &index, &deps)?);
    log::debug!(
        "{} head candidates, {} named-entity candidates",
        head_count,
        candidates.len() - head_count
    );

    let mentions: Vec<Mention> = candidates
        .iter()
        .zip(0u32..)
        .map(|(candidate, id)| build_mention(id, candidate, &index, &deps, stopwords))
        .collect();
    let mut mentions = merge_duplicates(mentions);
    mentions.sort_by_key(|m| (m.begin_offset, m.head_offset));
    for (mention, id) in mentions.iter_mut().zip(0u32..) {
        mention.id = id.into();
    }

    let tokens: OffsetStrings = doc.terms.iter().map(|t| (t.offset, t.text.clone())).collect();

    let term_quotations = match &doc.quotations {
        Some(annotated) => annotated
            .iter()
            .map(|q| TermQuotation::from_annotation(q, &index))
            .collect::<Result<Vec<_>>>()?,
        None => {
            let mut detected = quotes::detect(&index);
            for quote in &mut detected {
                quotes::attribute(quote, &index, &deps);
            }
            detected
        }
    };
    let quotations = term_quotations
        .iter()
        .map(|q| quotes::to_quotation(q, &index, &mentions))
        .collect();

    log::info!(
        "Extracted {} mentions and {} quotations from {} terms",
        mentions.len(),
        term_quotations.len(),
        doc.terms.len()
    );
    let mut document = MentionDocument::new(mentions, tokens).with_quotations(quotations);
    document.id = doc.id.clone();
    Ok(document)
}
