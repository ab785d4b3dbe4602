//! Error types for the tenant directory.

use thiserror::Error;
use tidemark_core::TenantId;
use tidemark_store::StoreError;

/// Result type alias for tenant operations.
pub type TenantResult<T> = Result<T, TenantError>;

/// Errors that can occur during tenant operations.
#[derive(Debug, Error)]
pub enum TenantError {
    #[error("tenant not found: {0}")]
    NotFound(TenantId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
