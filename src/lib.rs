//! # multisieve
//!
//! Deterministic coreference resolution with ordered sieves, after
//! Lee et al. (2013), with Dutch defaults.
//!
//! - **Mentions**: supplied pre-materialised ([`MentionDocument`]) or
//!   extracted from terms and dependencies ([`TermDocument`])
//! - **Sieves**: ten passes from high to low precision, each merging an
//!   entity into at most one earlier antecedent
//! - **Output**: coreference groups as JSON ([`CoreferenceOutput`])
//!
//! ## Quick Start
//!
//! ```rust
//! use multisieve::{Mention, MentionDocument, OffsetStrings, Resolver};
//!
//! // "Jan lacht . hij zingt"
//! let tokens: OffsetStrings = [(0, "Jan"), (4, "lacht"), (10, "."), (12, "hij"), (16, "zingt")]
//!     .into_iter()
//!     .collect();
//! let mentions = vec![
//!     Mention::new(0, [0], 0).with_head_pos("name").with_sentence(0).with_number("ev"),
//!     Mention::new(1, [12], 12).with_head_pos("pron").with_sentence(1).with_number("ev"),
//! ];
//! let output = Resolver::new().resolve(&MentionDocument::new(mentions, tokens)).unwrap();
//! assert_eq!(output.groups.len(), 1);
//! ```
//!
//! ## Sieve Order
//!
//! | # | Sieve |
//! |---|-------|
//! | 1 | Speaker identification |
//! | 2 | Exact string match |
//! | 3 | Relaxed string match |
//! | 4 | Precise constructs (appositive, predicative, relative pronoun, acronym, reflexive) |
//! | 5-7 | Strict head match and two relaxations |
//! | 8 | Proper head word match |
//! | 9 | Relaxed head match |
//! | 10 | Pronoun resolution |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! multisieve = "0.3"
//! multisieve = { version = "0.3", features = ["parallel"] } # rayon batches
//! multisieve = { version = "0.3", features = ["cli"] }      # CLI front end
//! ```
//!
//! The entity collection itself lives in [`multisieve_core`] and is
//! re-exported here.

#![warn(missing_docs)]

pub mod config;
pub mod constraints;
pub mod document;
pub mod error;
pub mod extract;
pub mod filters;
pub mod lang;
pub mod output;
pub mod quotation;
pub mod resolver;
pub mod runner;
pub mod sieves;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::ResolverConfig;
pub use document::{MentionDocument, OffsetStrings};
pub use error::{Error, Result};
pub use extract::{extract_mentions, TermDocument};
pub use lang::Stopwords;
pub use output::{CoreferenceGroup, CoreferenceOutput, GroupMention};
pub use quotation::Quotation;
pub use resolver::Resolver;
pub use runner::SieveRunner;
pub use sieves::{default_sieves, Sieve, SieveContext, DEFAULT_MAX_PRONOUN_DISTANCE};

pub use multisieve_core::{
    Entities, Entity, EntityId, EntityRef, EntityType, Mention, MentionId, Offset, Person, Pos, Span,
};
