//! tidemark-registry — document-shaped sub-resource CRUD.
//!
//! The [`ResourceRegistry`] composes the payload operations from
//! `tidemark-document` with the transaction scope of `tidemark-store`:
//! every mutation runs its whole fetch-decode-mutate-persist sequence
//! against one document row inside a single write transaction.
//!
//! # Consistency model
//!
//! The document row is the unit of mutual exclusion; there is no
//! per-item locking. Concurrent item-level writes to the same
//! (tenant, resource name) row serialize on redb's single writer and
//! merge last-writer-wins at row granularity. Operations on different
//! rows are independent.

pub mod error;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::ResourceRegistry;
