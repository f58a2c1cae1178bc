//! Error types for multisieve-core.

use thiserror::Error;

/// Result type for multisieve-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for multisieve-core operations.
///
/// Every variant signals a wiring mistake by the caller. None of them is
/// repaired silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided (empty entity, self-disjointness, non-member entity...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two or more mentions share an id.
    #[error("Some mentions have equal ids. Duplicate ids: {0}")]
    DuplicateMentionIds(String),

    /// None of the mentions of an entity has a value for the attribute.
    #[error("None of the mentions have the attribute {0:?}")]
    MissingAttribute(&'static str),

    /// The entity is not in the collection.
    #[error("Entity not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Returns true if this error means no mention carried the attribute.
    #[must_use]
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self, Self::MissingAttribute(_))
    }
}
