//! Error types for taxonomy loading.

use thiserror::Error;

/// Errors that can occur while loading a keyword taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// IO error (file read).
    #[error("IO error: {0}")]
    Io(String),

    /// YAML could not be parsed or serialized.
    #[error("taxonomy format error: {0}")]
    Parse(String),

    /// The taxonomy parsed but failed validation.
    #[error("invalid taxonomy: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
