//! Agreement features read from Dutch morphological tags.
//!
//! Tags look like `VNW(pers,pron,nomin,vol,3,ev,masc)` or
//! `N(soort,ev,basis,zijd,stan)`; features are found by substring.

use multisieve_core::Person;

/// Possessives whose tag leaves number open but whose lemma is singular.
const SINGULAR_POSSESSIVES: [&str; 5] = ["haar", "zijn", "mijn", "jouw", "je"];
const PLURAL_POSSESSIVES: [&str; 3] = ["ons", "jullie", "hun"];

/// Agreement features of one head term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Morphology {
    /// Grammatical person.
    pub person: Option<Person>,
    /// `fem`, `masc` or `neut`.
    pub gender: Option<String>,
    /// `ev` (singular) or `mv` (plural).
    pub number: Option<String>,
    /// Relative pronoun.
    pub relative: bool,
    /// Reflexive pronoun.
    pub reflexive: bool,
}

impl Morphology {
    /// Read the features of a term from its tag and lemma.
    pub fn analyze(morphofeat: &str, lemma: &str) -> Self {
        Self {
            person: person(morphofeat),
            gender: gender(morphofeat).map(str::to_string),
            number: number(morphofeat, lemma).map(str::to_string),
            relative: morphofeat.contains("betr,"),
            reflexive: morphofeat.contains("refl,"),
        }
    }
}

fn person(morphofeat: &str) -> Option<Person> {
    if morphofeat.contains('1') {
        Some(Person::First)
    } else if morphofeat.contains('2') {
        Some(Person::Second)
    } else if morphofeat.contains('3') {
        Some(Person::Third)
    } else {
        None
    }
}

fn gender(morphofeat: &str) -> Option<&'static str> {
    if morphofeat.contains("fem") {
        Some("fem")
    } else if morphofeat.contains("masc") {
        Some("masc")
    } else if morphofeat.contains("onz,") {
        Some("neut")
    } else {
        None
    }
}

fn number(morphofeat: &str, lemma: &str) -> Option<&'static str> {
    if morphofeat.contains("ev") {
        Some("ev")
    } else if morphofeat.contains("mv") {
        Some("mv")
    } else if morphofeat.contains("getal") {
        if SINGULAR_POSSESSIVES.contains(&lemma) {
            Some("ev")
        } else if PLURAL_POSSESSIVES.contains(&lemma) {
            Some("mv")
        } else {
            None
        }
    } else {
        None
    }
}
