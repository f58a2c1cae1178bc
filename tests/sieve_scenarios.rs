//! Resolution scenarios, one sieve at a time and through the full resolver.

use multisieve::sieves::{
    ExactStringMatch, PreciseConstruct, PreciseConstructs, PronounResolution, SpeakerIdentification,
};
use multisieve::{
    Entities, EntityType, Mention, MentionDocument, MentionId, OffsetStrings, Person, Pos, Quotation, Resolver,
    Sieve, SieveRunner,
};

fn tokens(words: &[(u32, &str)]) -> OffsetStrings {
    words.iter().copied().collect()
}

/// Run one sieve and return the mention ids of every entity.
fn groups_after(
    sieve: &dyn Sieve,
    entities: &mut Entities,
    words: &OffsetStrings,
    quotes: &[Quotation],
) -> Vec<Vec<u32>> {
    SieveRunner::new(entities, words).with_quotations(quotes).run(sieve).unwrap();
    entities
        .iter()
        .map(|e| e.mention_ids().map(|m| m.0).collect())
        .collect()
}

// =============================================================================
// Exact string match
// =============================================================================

fn obama_mentions() -> (Vec<Mention>, OffsetStrings) {
    // Obama vindt dat ook Obama ...
    let words = tokens(&[(0, "Obama"), (6, "vindt"), (12, "dat"), (16, "ook"), (20, "Obama")]);
    let mentions = vec![
        Mention::new(0, [0], 0).with_head_pos(Pos::Name),
        Mention::new(1, [20], 20).with_head_pos(Pos::Name),
    ];
    (mentions, words)
}

#[test]
fn identical_names_merge() {
    let (mentions, words) = obama_mentions();
    let mut entities = Entities::from_mentions(mentions).unwrap();
    let groups = groups_after(&ExactStringMatch, &mut entities, &words, &[]);
    assert_eq!(groups, vec![vec![0, 1]]);
    assert_eq!(entities.iter().next().unwrap().len(), 2);
}

#[test]
fn identical_names_merge_through_resolver() {
    let (mentions, words) = obama_mentions();
    let output = Resolver::new().resolve(&MentionDocument::new(mentions, words)).unwrap();
    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.groups[0].id, "co1");
    let texts: Vec<&str> = output.groups[0].mentions.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Obama", "Obama"]);
}

#[test]
fn disjoint_names_stay_apart() {
    let (mut mentions, words) = obama_mentions();
    mentions[1] = mentions[1].clone().with_prohibited([MentionId(0)]);
    let mut entities = Entities::from_mentions(mentions).unwrap();
    let groups = groups_after(&ExactStringMatch, &mut entities, &words, &[]);
    assert_eq!(groups, vec![vec![0], vec![1]]);
}

// =============================================================================
// Pronoun resolution
// =============================================================================

fn jan_hij() -> (Vec<Mention>, OffsetStrings) {
    let words = tokens(&[(40, "Jan"), (44, "fietst"), (51, "."), (53, "hij"), (57, "valt")]);
    let mentions = vec![
        Mention::new(0, [40], 40)
            .with_head_pos(Pos::Name)
            .with_sentence(4)
            .with_number("ev")
            .with_gender("masc"),
        Mention::new(1, [53], 53)
            .with_head_pos(Pos::Pron)
            .with_sentence(5)
            .with_number("ev")
            .with_gender("masc")
            .with_person(Person::Third),
    ];
    (mentions, words)
}

#[test]
fn pronoun_links_to_agreeing_name() {
    let (mentions, words) = jan_hij();
    let mut entities = Entities::from_mentions(mentions).unwrap();
    let groups = groups_after(&PronounResolution, &mut entities, &words, &[]);
    assert_eq!(groups, vec![vec![0, 1]]);
}

#[test]
fn pronoun_outside_window_stays_alone() {
    let (mentions, words) = jan_hij();
    let mut entities = Entities::from_mentions(mentions).unwrap();
    SieveRunner::new(&mut entities, &words)
        .with_max_pronoun_distance(0)
        .run(&PronounResolution)
        .unwrap();
    assert_eq!(entities.len(), 2);
}

#[test]
fn pronoun_gender_mismatch_stays_alone() {
    let (mut mentions, words) = jan_hij();
    mentions[0].gender = Some("fem".to_string());
    let output = Resolver::new().resolve(&MentionDocument::new(mentions, words)).unwrap();
    assert!(output.groups.is_empty());
}

// =============================================================================
// Precise constructs
// =============================================================================

#[test]
fn acronym_in_modifiers_merges() {
    // Agence France Presse ( AFP ) meldt
    let words = tokens(&[
        (0, "Agence"),
        (7, "France"),
        (14, "Presse"),
        (21, "("),
        (23, "AFP"),
        (27, ")"),
        (29, "meldt"),
    ]);
    let mentions = vec![
        Mention::new(0, [0, 7, 14, 21, 23, 27], 0)
            .with_head_pos(Pos::Name)
            .with_entity_type(EntityType::Organization)
            .with_modifiers(vec![vec![23]]),
        Mention::new(1, [23], 23)
            .with_head_pos(Pos::Name)
            .with_entity_type(EntityType::Organization),
    ];
    let mut entities = Entities::from_mentions(mentions.clone()).unwrap();
    let acronyms = PreciseConstructs::with_constructs([PreciseConstruct::Acronym]);
    assert_eq!(groups_after(&acronyms, &mut entities, &words, &[]), vec![vec![0, 1]]);

    let output = Resolver::new().resolve(&MentionDocument::new(mentions, words)).unwrap();
    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.groups[0].mentions.len(), 2);
}

// =============================================================================
// Speaker identification
// =============================================================================

#[test]
fn first_person_joins_speaker_and_avoids_other_participants() {
    // Jan zei tegen Piet over Marie : " ik kom "
    let words = tokens(&[
        (0, "Jan"),
        (4, "zei"),
        (8, "tegen"),
        (14, "Piet"),
        (19, "over"),
        (24, "Marie"),
        (30, ":"),
        (32, "\""),
        (33, "ik"),
        (36, "kom"),
        (39, "\""),
    ]);
    let mentions = vec![
        Mention::new(0, [0], 0).with_head_pos(Pos::Name),
        Mention::new(1, [14], 14).with_head_pos(Pos::Name),
        Mention::new(2, [24], 24).with_head_pos(Pos::Name),
        Mention::new(3, [33], 33).with_head_pos(Pos::Pron).with_person(Person::First),
    ];
    let quotes = vec![Quotation::new([33, 36])
        .with_source(MentionId(0))
        .with_addressee(MentionId(1))
        .with_topic(MentionId(2))];

    let mut entities = Entities::from_mentions(mentions).unwrap();
    let groups = groups_after(&SpeakerIdentification, &mut entities, &words, &quotes);
    assert_eq!(groups, vec![vec![0, 3], vec![1], vec![2]]);

    let jan = entities.find_mention(MentionId(0)).unwrap();
    let piet = entities.find_mention(MentionId(1)).unwrap();
    let marie = entities.find_mention(MentionId(2)).unwrap();
    assert!(!entities.merge_allowed(jan, piet));
    assert!(!entities.merge_allowed(jan, marie));
    assert!(entities.merge_allowed(piet, marie));
}

#[test]
fn speaker_after_quotation_takes_every_first_person() {
    // " ik zeg dat ik kom " zei Jan
    let words = tokens(&[
        (0, "\""),
        (1, "ik"),
        (4, "zeg"),
        (8, "dat"),
        (12, "ik"),
        (15, "kom"),
        (19, "\""),
        (21, "zei"),
        (25, "Jan"),
    ]);
    let mentions = vec![
        Mention::new(0, [1], 1).with_head_pos(Pos::Pron).with_person(Person::First),
        Mention::new(1, [12], 12).with_head_pos(Pos::Pron).with_person(Person::First),
        Mention::new(2, [25], 25).with_head_pos(Pos::Name),
    ];
    let quotes = vec![Quotation::new([1, 4, 8, 12, 15]).with_source(MentionId(2))];

    let mut entities = Entities::from_mentions(mentions.clone()).unwrap();
    let groups = groups_after(&SpeakerIdentification, &mut entities, &words, &quotes);
    assert_eq!(groups, vec![vec![0, 1, 2]]);

    // Far apart sentences keep the pronoun sieve out of it.
    let spread: Vec<Mention> = mentions
        .into_iter()
        .zip([0, 10, 10])
        .map(|(m, sentence)| m.with_sentence(sentence))
        .collect();
    let output = Resolver::new()
        .resolve(&MentionDocument::new(spread, words).with_quotations(quotes))
        .unwrap();
    assert_eq!(output.groups.len(), 1);
    assert_eq!(output.groups[0].len(), 3);
}
