//! # multisieve-core
//!
//! Core data structures of the multisieve coreference resolver.
//!
//! This crate provides:
//! - **Mentions**: [`Mention`] and its feature types ([`Pos`], [`Person`], [`EntityType`])
//! - **Entities**: [`Entity`], a non-empty cluster of mentions with attribute aggregation
//! - **Collection**: [`Entities`], the ordered partition state with disjointness constraints
//!
//! The sieves themselves live in the `multisieve` crate; everything here is
//! independent of language, stopwords and input format.

#![warn(missing_docs)]

pub mod entities;
pub mod entity;
pub mod error;
pub mod mention;

pub use entities::{CandidateFilter, Candidates, Entities, EntityId, EntityRef};
pub use entity::Entity;
pub use error::{Error, Result};
pub use mention::{EntityType, Mention, MentionId, Offset, Person, Pos, Span};
