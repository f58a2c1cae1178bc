//! Direct-speech detection and participant attribution.

use super::dependency::DependencyIndex;
use super::terms::{QuotationAnnotation, TermIndex};
use crate::error::Result;
use crate::quotation::Quotation;
use multisieve_core::{Mention, MentionId, Offset};
use std::collections::{BTreeSet, HashSet};

/// A quotation over term positions, before its participants are linked to
/// mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TermQuotation {
    pub span: Vec<usize>,
    pub marks: Vec<usize>,
    pub source: Option<BTreeSet<usize>>,
    pub addressee: Option<BTreeSet<usize>>,
    pub topic: Option<BTreeSet<usize>>,
}

impl TermQuotation {
    fn open(mark: usize) -> Self {
        Self {
            marks: vec![mark],
            ..Self::default()
        }
    }

    fn close(mut self, mark: usize) -> Self {
        self.marks.push(mark);
        self
    }

    /// Convert an annotated quotation.
    pub fn from_annotation(annotation: &QuotationAnnotation, index: &TermIndex<'_>) -> Result<Self> {
        let participant = |ids: &Option<Vec<String>>| -> Result<Option<BTreeSet<usize>>> {
            match ids {
                Some(ids) => Ok(Some(index.positions(ids)?.into_iter().collect())),
                None => Ok(None),
            }
        };
        Ok(Self {
            span: index.positions(&annotation.span)?,
            marks: Vec::new(),
            source: participant(&annotation.source)?,
            addressee: participant(&annotation.addressee)?,
            topic: participant(&annotation.topic)?,
        })
    }
}

fn is_double_quote(lemma: &str) -> bool {
    matches!(lemma, "\"" | "&quot;")
}

/// Find quotations between quote-mark terms.
///
/// A double quote breaks off an open single quotation. Quotations without
/// any term between the marks are dropped.
pub(crate) fn detect(index: &TermIndex<'_>) -> Vec<TermQuotation> {
    let mut found = Vec::new();
    let mut double: Option<TermQuotation> = None;
    let mut single: Option<TermQuotation> = None;
    for (position, term) in index.terms().iter().enumerate() {
        let lemma = term.lemma();
        if is_double_quote(lemma) {
            match double.take() {
                None => double = Some(TermQuotation::open(position)),
                Some(quote) => found.push(quote.close(position)),
            }
            single = None;
        } else if let Some(quote) = double.as_mut() {
            quote.span.push(position);
        }

        if lemma == "'" {
            match single.take() {
                None => single = Some(TermQuotation::open(position)),
                Some(quote) => found.push(quote.close(position)),
            }
        } else if let Some(quote) = single.as_mut() {
            quote.span.push(position);
        }
    }
    if double.is_some() || single.is_some() {
        log::debug!("Unclosed quotation at end of document");
    }
    found.retain(|q| !q.span.is_empty());
    found
}

/// Participants of a reporting verb: subject, indirect object and
/// prepositional modifiers ("tegen" for the addressee, "over" for the topic).
fn analyze_reporting_verb(
    verb: usize,
    index: &TermIndex<'_>,
    deps: &DependencyIndex,
    quote: &mut TermQuotation,
) {
    let object_of = |preposition: usize| {
        deps.raw_dependents(preposition)
            .iter()
            .filter(|(_, relation)| relation == "hd/obj1")
            .map(|(to, _)| *to)
            .last()
    };
    for (dependent, relation) in deps.raw_dependents(verb) {
        let term = index.term(*dependent);
        match relation.as_str() {
            "hd/su" => quote.source = Some(deps.constituent(*dependent)),
            "hd/obj2" if term.pos == "prep" => {
                if let Some(object) = object_of(*dependent) {
                    quote.addressee = Some(deps.constituent(object));
                }
            }
            "hd/obj2" => quote.addressee = Some(deps.constituent(*dependent)),
            "hd/mod" if term.pos == "prep" => {
                if let Some(object) = object_of(*dependent) {
                    match term.lemma() {
                        "tegen" => quote.addressee = Some(deps.constituent(object)),
                        "over" => quote.topic = Some(deps.constituent(object)),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

/// Attribute participants through the reporting verb the quotation is
/// attached to with a `nucl/tag` or `dp/dp` relation.
pub(crate) fn attribute(quote: &mut TermQuotation, index: &TermIndex<'_>, deps: &DependencyIndex) {
    let inside: HashSet<usize> = quote.span.iter().chain(&quote.marks).copied().collect();
    let span = quote.span.clone();
    for term in span {
        let verb = deps
            .raw_dependents(term)
            .iter()
            .find(|(to, relation)| {
                !inside.contains(to) && matches!(relation.as_str(), "nucl/tag" | "dp/dp")
            })
            .map(|(to, _)| *to);
        if let Some(verb) = verb {
            analyze_reporting_verb(verb, index, deps, quote);
        }
    }
}

/// The first mention whose span equals `span`, else the first whose span
/// contains it or is contained in it.
fn link(span: &BTreeSet<Offset>, mentions: &[Mention]) -> Option<MentionId> {
    let as_set = |m: &Mention| m.span.iter().copied().collect::<BTreeSet<Offset>>();
    mentions
        .iter()
        .find(|m| &as_set(m) == span)
        .or_else(|| {
            mentions.iter().find(|m| {
                let other = as_set(m);
                span.is_subset(&other) || span.is_superset(&other)
            })
        })
        .map(|m| m.id)
}

/// Resolve a term quotation to offsets and mention ids.
pub(crate) fn to_quotation(quote: &TermQuotation, index: &TermIndex<'_>, mentions: &[Mention]) -> Quotation {
    let mut quotation = Quotation::new(index.offsets(quote.span.iter().copied()));
    let resolve = |role: &str, participant: &Option<BTreeSet<usize>>| -> Option<MentionId> {
        let positions = participant.as_ref()?;
        let offsets: BTreeSet<Offset> = index.offsets(positions.iter().copied()).into_iter().collect();
        let linked = link(&offsets, mentions);
        if linked.is_none() {
            log::warn!("Quotation {role} at offsets {offsets:?} matches no mention; dropped");
        }
        linked
    };
    quotation.source = resolve("source", &quote.source);
    quotation.addressee = resolve("addressee", &quote.addressee);
    quotation.topic = resolve("topic", &quote.topic);
    quotation
}
