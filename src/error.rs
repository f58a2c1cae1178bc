//! Error types for multisieve.

use thiserror::Error;

/// Result type for multisieve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for multisieve operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invariant violation in the core data structures.
    #[error(transparent)]
    Core(#[from] multisieve_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input or output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No built-in resources for the requested language.
    #[error("No language data for {0:?}")]
    UnknownLanguage(String),

    /// Mention extraction failed on a term document.
    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an extraction error.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Error::Extraction(msg.into())
    }
}
