//! Mention candidates and their features.

use super::dependency::DependencyIndex;
use super::morphology::Morphology;
use super::terms::{NamedEntity, TermIndex, TermType};
use crate::error::Result;
use crate::lang::Stopwords;
use multisieve_core::{EntityType, Mention, Offset, Pos, Span};
use std::collections::{BTreeSet, HashSet};

const NOMINAL_POS: [&str; 3] = ["noun", "pron", "name"];

/// A head term with the terms of its mention.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    head: usize,
    span: BTreeSet<usize>,
    multiword: Vec<usize>,
    entity_type: Option<EntityType>,
}

impl Candidate {
    fn from_head(head: usize, deps: &DependencyIndex) -> Self {
        Self {
            head,
            span: deps.constituent(head),
            multiword: deps.dependents_with(head, "mwp/mwp").collect(),
            entity_type: None,
        }
    }
}

/// Heads of nouns, pronouns and names, plus possessive determiners.
pub(crate) fn head_candidates(index: &TermIndex<'_>, deps: &DependencyIndex) -> Vec<Candidate> {
    index
        .terms()
        .iter()
        .enumerate()
        .filter(|(_, term)| {
            NOMINAL_POS.contains(&term.pos.as_str())
                || (term.pos == "det" && term.morphofeat.contains("VNW(bez"))
        })
        .map(|(position, _)| Candidate::from_head(position, deps))
        .collect()
}

/// One candidate per named entity. An annotation whose span is contained in
/// another one's is dropped.
pub(crate) fn entity_candidates(
    entities: &[NamedEntity],
    index: &TermIndex<'_>,
    deps: &DependencyIndex,
) -> Result<Vec<Candidate>> {
    let mut kept: Vec<(BTreeSet<usize>, Candidate)> = Vec::new();
    for entity in entities {
        let span = index.positions(&entity.span)?;
        if span.is_empty() {
            log::warn!("Skipping {} entity with an empty span", entity.entity_type);
            continue;
        }
        let set: BTreeSet<usize> = span.iter().copied().collect();
        if kept.iter().any(|(other, _)| set.is_subset(other)) {
            continue;
        }
        kept.retain(|(other, _)| !other.is_subset(&set));
        let head = find_head_in_span(&span, deps);
        let candidate = Candidate {
            head,
            span: deps.constituent(head),
            multiword: span,
            entity_type: Some(EntityType::from_label(&entity.entity_type)),
        };
        kept.push((set, candidate));
    }
    Ok(kept.into_iter().map(|(_, c)| c).collect())
}

/// The first term whose constituent strictly contains the span, else the
/// term heading most of the span.
fn find_head_in_span(span: &[usize], deps: &DependencyIndex) -> usize {
    let members: BTreeSet<usize> = span.iter().copied().collect();
    let containing = span.iter().copied().find(|&term| {
        let constituent = deps.constituent(term);
        members.is_subset(&constituent) && members.len() < constituent.len()
    });
    containing.unwrap_or_else(|| closest_to_head(span, deps))
}

/// The term with the most direct dependents inside the span; ties go to the
/// earliest. Falls back to the first term.
fn closest_to_head(span: &[usize], deps: &DependencyIndex) -> usize {
    let mut best: Option<(usize, usize)> = None;
    for &term in span.iter().filter(|&&t| deps.is_head(t)) {
        let count = deps
            .dependents(term)
            .iter()
            .filter(|(to, _)| span.contains(to))
            .count();
        if best.map_or(true, |(c, _)| count > c) {
            best = Some((count, term));
        }
    }
    best.map_or(span[0], |(_, term)| term)
}

fn sorted_offsets(index: &TermIndex<'_>, positions: impl IntoIterator<Item = usize>) -> Span {
    let mut offsets = index.offsets(positions);
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// Build the mention for a candidate.
pub(crate) fn build_mention(
    id: u32,
    candidate: &Candidate,
    index: &TermIndex<'_>,
    deps: &DependencyIndex,
    stopwords: &Stopwords,
) -> Mention {
    let head_term = index.term(candidate.head);
    let head_offset = head_term.offset;
    let span_terms: Vec<usize> = candidate.span.iter().copied().collect();

    let begin = span_terms.iter().map(|&t| index.term(t).offset).min().unwrap_or(head_offset);
    let end = span_terms.iter().map(|&t| index.term(t).end()).max().unwrap_or(head_offset);

    let constituent_offsets = |dependent: usize| sorted_offsets(index, deps.constituent(dependent));
    let modifiers: Vec<Span> = deps
        .dependents_with(candidate.head, "hd/mod")
        .map(constituent_offsets)
        .collect();
    let appositives: Vec<Span> = deps
        .dependents_with(candidate.head, "hd/app")
        .map(constituent_offsets)
        .collect();
    let predicatives: Vec<Span> = deps
        .heads(candidate.head)
        .iter()
        .filter(|(_, relation)| relation == "hd/su")
        .flat_map(|(verb, _)| deps.dependents(*verb))
        .filter(|(_, relation)| relation == "hd/predc" || relation == "hd/predm")
        .map(|(dependent, _)| constituent_offsets(*dependent))
        .collect();

    let post_head: HashSet<Offset> = modifiers
        .iter()
        .chain(&appositives)
        .flatten()
        .copied()
        .filter(|&o| o > head_offset)
        .collect();
    let span = sorted_offsets(index, span_terms.iter().copied());
    let relaxed_span: Span = span.iter().copied().filter(|o| !post_head.contains(o)).collect();

    let non_stopwords = span_terms.iter().copied().filter(|&t| {
        let term = index.term(t);
        term.term_type != TermType::Closed && !stopwords.contains(&term.lemma().to_lowercase())
    });
    let main_modifiers = span_terms
        .iter()
        .copied()
        .filter(|&t| matches!(index.term(t).pos.as_str(), "adj" | "noun"));

    let full_head = std::iter::once(candidate.head).chain(candidate.multiword.iter().copied());

    let mut mention = Mention::new(id, span, head_offset)
        .with_offsets(begin, end)
        .with_relaxed_span(relaxed_span)
        .with_full_head(sorted_offsets(index, full_head))
        .with_head_pos(Pos::from(head_term.pos.as_str()))
        .with_sentence(head_term.sentence)
        .with_modifiers(modifiers)
        .with_appositives(appositives)
        .with_predicatives(predicatives)
        .with_non_stopwords(sorted_offsets(index, non_stopwords))
        .with_main_modifiers(sorted_offsets(index, main_modifiers));

    if NOMINAL_POS.contains(&head_term.pos.as_str()) {
        let morphology = Morphology::analyze(&head_term.morphofeat, head_term.lemma());
        mention.person = morphology.person;
        mention.gender = morphology.gender;
        mention.number = morphology.number;
        mention.is_relative_pronoun = morphology.relative;
        mention.is_reflexive_pronoun = morphology.reflexive;
    }
    mention.entity_type = candidate.entity_type.clone();
    mention
}

/// Fold `later` into the `earlier` mention it duplicates.
fn absorb(earlier: &mut Mention, later: Mention) {
    if earlier.head_offset == later.head_offset {
        if earlier.span == later.span {
            if earlier.entity_type.is_none() {
                earlier.entity_type = later.entity_type;
            }
        } else if later.entity_type.is_none() {
            earlier.span = later.span;
        }
    } else if later.entity_type.is_none() {
        earlier.head_offset = later.head_offset;
    } else {
        earlier.entity_type = later.entity_type;
    }
}

/// Merge mentions sharing a head or a span into the earliest of them.
pub(crate) fn merge_duplicates(mentions: Vec<Mention>) -> Vec<Mention> {
    let mut merged: Vec<Mention> = Vec::with_capacity(mentions.len());
    for mention in mentions {
        let duplicate = merged
            .iter_mut()
            .find(|m| m.head_offset == mention.head_offset || m.span == mention.span);
        match duplicate {
            Some(earlier) => {
                log::debug!("Merging duplicate mention {} into {}", mention.id, earlier.id);
                absorb(earlier, mention);
            }
            None => merged.push(mention),
        }
    }
    merged
}
