//! Property-based tests for resolver output on arbitrary mention documents.

use multisieve::{Mention, MentionDocument, MentionId, OffsetStrings, Person, Pos, Resolver, ResolverConfig};
use proptest::prelude::*;
use std::collections::BTreeSet;

const WORDS: &[&str] = &["Jan", "Marie", "hij", "zij", "het", "huis", "de", "Piet", "ik", "hond"];

#[derive(Debug, Clone)]
struct MentionSpec {
    word: usize,
    pos: Pos,
    number: Option<&'static str>,
    gender: Option<&'static str>,
    person: Option<Person>,
}

fn mention_spec() -> impl Strategy<Value = MentionSpec> {
    (
        0..WORDS.len(),
        prop_oneof![Just(Pos::Name), Just(Pos::Noun), Just(Pos::Pron)],
        prop::option::of(prop_oneof![Just("ev"), Just("mv")]),
        prop::option::of(prop_oneof![Just("masc"), Just("fem"), Just("neut")]),
        prop::option::of(prop_oneof![Just(Person::First), Just(Person::Third)]),
    )
        .prop_map(|(word, pos, number, gender, person)| MentionSpec {
            word,
            pos,
            number,
            gender,
            person,
        })
}

/// One single-token mention per word, ten offsets apart, three per sentence.
fn build(specs: &[MentionSpec]) -> MentionDocument {
    let mut tokens = OffsetStrings::new();
    let mut mentions = Vec::new();
    for (i, spec) in (0u32..).zip(specs) {
        let offset = i * 10;
        tokens.insert(offset, WORDS[spec.word].to_string());
        let mut mention = Mention::new(i, [offset], offset)
            .with_head_pos(spec.pos.clone())
            .with_sentence(i / 3);
        if let Some(number) = spec.number {
            mention = mention.with_number(number);
        }
        if let Some(gender) = spec.gender {
            mention = mention.with_gender(gender);
        }
        if let Some(person) = spec.person {
            mention = mention.with_person(person);
        }
        mentions.push(mention);
    }
    MentionDocument::new(mentions, tokens)
}

proptest! {
    #[test]
    fn every_mention_lands_in_exactly_one_group(specs in prop::collection::vec(mention_spec(), 0..20)) {
        let resolver = Resolver::from_config(ResolverConfig::default().with_singletons(true)).unwrap();
        let output = resolver.resolve(&build(&specs)).unwrap();

        let mut seen = BTreeSet::new();
        for group in &output.groups {
            prop_assert!(!group.is_empty());
            for id in group.mention_ids() {
                prop_assert!(seen.insert(id), "mention {:?} in two groups", id);
            }
        }
        let expected: BTreeSet<MentionId> = (0..specs.len() as u32).map(MentionId).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn groups_numbered_by_first_head(specs in prop::collection::vec(mention_spec(), 0..20)) {
        let resolver = Resolver::from_config(ResolverConfig::default().with_singletons(true)).unwrap();
        let output = resolver.resolve(&build(&specs)).unwrap();

        let firsts: Vec<u32> = output
            .groups
            .iter()
            .map(|g| g.mentions.iter().map(|m| m.head).min().unwrap())
            .collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
        for (i, group) in output.groups.iter().enumerate() {
            prop_assert_eq!(&group.id, &format!("co{}", i + 1));
            prop_assert!(group.mentions.windows(2).all(|w| w[0].span <= w[1].span));
        }
    }

    #[test]
    fn singletons_only_differ_in_dropped_groups(specs in prop::collection::vec(mention_spec(), 0..20)) {
        let doc = build(&specs);
        let chains = Resolver::new().resolve(&doc).unwrap();
        let all = Resolver::from_config(ResolverConfig::default().with_singletons(true))
            .unwrap()
            .resolve(&doc)
            .unwrap();

        prop_assert!(chains.groups.iter().all(|g| g.len() >= 2));
        let multi: Vec<Vec<MentionId>> = all
            .groups
            .iter()
            .filter(|g| g.len() >= 2)
            .map(|g| g.mention_ids().collect())
            .collect();
        let kept: Vec<Vec<MentionId>> = chains.groups.iter().map(|g| g.mention_ids().collect()).collect();
        prop_assert_eq!(kept, multi);
    }

    #[test]
    fn resolution_is_deterministic(specs in prop::collection::vec(mention_spec(), 0..20)) {
        let doc = build(&specs);
        let resolver = Resolver::new();
        prop_assert_eq!(resolver.resolve(&doc).unwrap(), resolver.resolve(&doc).unwrap());
    }
}
