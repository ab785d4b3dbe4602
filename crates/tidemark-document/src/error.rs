//! Error types for payload decoding and item operations.

use thiserror::Error;

/// Result type alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while decoding or mutating a payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("payload has no data member")]
    MissingData,

    #[error("payload data is neither an object nor an array")]
    UnsupportedData,

    #[error("item id {0} already exists")]
    DuplicateId(String),

    #[error("malformed item: {0}")]
    MalformedItem(String),
}
