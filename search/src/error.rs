//! Error types for the search crate.

use crate::IndexName;
use thiserror::Error;

/// Errors raised while validating index definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("index name must not be empty")]
    EmptyIndexName,

    #[error("index '{0}' must cover at least one key prefix")]
    MissingPrefix(IndexName),

    #[error("index '{0}' has an empty key prefix")]
    EmptyPrefix(IndexName),

    #[error("index '{0}' must declare at least one field")]
    NoFields(IndexName),

    #[error("field path must not be empty in index '{0}'")]
    EmptyFieldPath(IndexName),

    #[error("duplicate field name '{field}' in index '{index}'")]
    DuplicateField { index: IndexName, field: String },
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Whether an engine error message means "this index does not exist".
///
/// RediSearch has used several spellings over its releases.
pub fn is_unknown_index_message(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("unknown index") || message.contains("no such index")
}
