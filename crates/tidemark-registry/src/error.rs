//! Registry error types.

use thiserror::Error;

use tidemark_document::DocumentError;
use tidemark_store::StoreError;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by sub-resource operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Document or item absent where one is required. Never raised by
    /// create, which falls back to document creation.
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored payload or submitted item failed to decode.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// An item with the same id is already stored under this resource
    /// name.
    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    /// Underlying store failure, propagated verbatim.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<DocumentError> for RegistryError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::DuplicateId(id) => RegistryError::DuplicateId(id),
            other => RegistryError::InvalidPayload(other.to_string()),
        }
    }
}
