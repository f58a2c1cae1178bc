//! Two-mention and two-entity constraints.
//!
//! The first argument is always the candidate antecedent, the second the
//! mention or entity occurring later. Entity-level constraints take mention
//! iterators, so a sieve can restrict either side to a subset of mentions.

use crate::document::OffsetStrings;
use multisieve_core::{Entity, Mention};
use std::collections::HashSet;
use std::hash::Hash;

/// Head words of some subject mention equal head words of some antecedent
/// mention.
pub fn head_words_match<'a>(
    antecedent: impl IntoIterator<Item = &'a Mention>,
    subject: impl IntoIterator<Item = &'a Mention>,
    words: &OffsetStrings,
) -> bool {
    let antecedent_heads: HashSet<&str> = antecedent
        .into_iter()
        .filter_map(|m| words.get(m.head_offset))
        .collect();
    subject
        .into_iter()
        .filter_map(|m| words.get(m.head_offset))
        .any(|w| antecedent_heads.contains(w))
}

/// Entity head match: [`head_words_match`] over all members.
pub fn entity_head_match(antecedent: &Entity, entity: &Entity, words: &OffsetStrings) -> bool {
    head_words_match(antecedent.iter(), entity.iter(), words)
}

/// Every non-stopword of the subject also occurs as a non-stopword of the
/// antecedent.
pub fn words_included<'a>(
    antecedent: impl IntoIterator<Item = &'a Mention>,
    subject: impl IntoIterator<Item = &'a Mention>,
    words: &OffsetStrings,
) -> bool {
    let antecedent_words: HashSet<&str> = antecedent
        .into_iter()
        .flat_map(|m| words.words(&m.non_stopwords))
        .collect();
    subject
        .into_iter()
        .flat_map(|m| words.words(&m.non_stopwords))
        .all(|w| antecedent_words.contains(w))
}

/// Entity-level word inclusion.
pub fn word_inclusion(antecedent: &Entity, entity: &Entity, words: &OffsetStrings) -> bool {
    words_included(antecedent.iter(), entity.iter(), words)
}

/// The noun and adjective modifiers of `mention` all occur among those of
/// `antecedent`.
///
/// Compared token by token on surface strings, not constituent by
/// constituent.
pub fn compatible_modifiers_only(antecedent: &Mention, mention: &Mention, words: &OffsetStrings) -> bool {
    let antecedent_mods: HashSet<&str> = words.words(&antecedent.main_modifiers).collect();
    words
        .words(&mention.main_modifiers)
        .all(|w| antecedent_mods.contains(w))
}

/// Neither mention fully contains the other.
///
/// Symmetric. Mentions with identical bounds count as containing each
/// other, as do mentions sharing exactly one bound.
pub fn not_i_within_i(antecedent: &Mention, mention: &Mention) -> bool {
    let (b1, e1) = (antecedent.begin_offset, antecedent.end_offset);
    let (b2, e2) = (mention.begin_offset, mention.end_offset);
    (b2 > b1 && e2 > e1) || (e1 > e2 && b1 > b2)
}

/// Feature sets are compatible when either is unknown (empty) or they
/// share a value.
pub fn is_compatible<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> bool {
    a.is_empty() || b.is_empty() || !a.is_disjoint(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> OffsetStrings {
        [
            (0, "de"),
            (3, "grote"),
            (9, "hond"),
            (14, "zag"),
            (18, "de"),
            (21, "hond"),
            (26, "blaffen"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn head_match_compares_surface_strings() {
        let words = tokens();
        let a = Entity::singleton(Mention::new(0, [0, 3, 9], 9));
        let b = Entity::singleton(Mention::new(1, [18, 21], 21));
        let c = Entity::singleton(Mention::new(2, [26], 26));
        assert!(entity_head_match(&a, &b, &words));
        assert!(!entity_head_match(&a, &c, &words));
    }

    #[test]
    fn word_inclusion_is_directional() {
        let words = tokens();
        let big = Entity::singleton(Mention::new(0, [0, 3, 9], 9).with_non_stopwords([3, 9]));
        let small = Entity::singleton(Mention::new(1, [18, 21], 21).with_non_stopwords([21]));
        assert!(word_inclusion(&big, &small, &words));
        assert!(!word_inclusion(&small, &big, &words));
    }

    #[test]
    fn modifiers_subset() {
        let words = tokens();
        let big = Mention::new(0, [0, 3, 9], 9).with_main_modifiers([3]);
        let small = Mention::new(1, [18, 21], 21);
        assert!(compatible_modifiers_only(&big, &small, &words));
        assert!(!compatible_modifiers_only(&small, &big, &words));
    }

    #[test]
    fn i_within_i() {
        let outer = Mention::new(0, [0, 9], 0).with_offsets(0, 13);
        let inner = Mention::new(1, [3], 3).with_offsets(3, 8);
        let later = Mention::new(2, [18], 18).with_offsets(18, 25);
        let overlapping = Mention::new(3, [9, 14], 9).with_offsets(9, 17);
        let same_begin = Mention::new(4, [0], 0).with_offsets(0, 2);

        assert!(!not_i_within_i(&outer, &inner));
        assert!(!not_i_within_i(&inner, &outer));
        assert!(not_i_within_i(&outer, &later));
        assert!(not_i_within_i(&later, &outer));
        assert!(not_i_within_i(&outer, &overlapping));
        assert!(!not_i_within_i(&outer, &outer));
        assert!(!not_i_within_i(&outer, &same_begin));
    }

    #[test]
    fn compatibility_is_wildcard_tolerant() {
        let empty: HashSet<&str> = HashSet::new();
        let ev = HashSet::from(["ev"]);
        let mv = HashSet::from(["mv"]);
        let both = HashSet::from(["ev", "mv"]);
        assert!(is_compatible(&empty, &ev));
        assert!(is_compatible(&ev, &both));
        assert!(!is_compatible(&ev, &mv));
    }
}
