//! Error types
//!
//! Generation and extraction never fail towards the caller. These types cover
//! the fallible edges (loading stored schemas, CLI input) and the per-field
//! failures the extractor logs before swallowing them.

use thiserror::Error;

/// Errors surfaced by the public, fallible operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid selector schema JSON: {0}")]
    InvalidSchemaJson(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single field produced no value.
#[derive(Debug, Error)]
pub(crate) enum FieldError {
    #[error("selector `{selector}` does not parse: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no element matches `{0}`")]
    NoMatch(String),

    #[error("element has no `{0}` attribute")]
    MissingAttribute(String),

    #[error("element text is not JSON: {0}")]
    InvalidJson(String),

    #[error("JSON path `{0}` does not resolve")]
    PathNotFound(String),
}
