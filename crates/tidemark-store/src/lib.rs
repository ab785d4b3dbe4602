//! tidemark-store — embedded persistence for Tidemark.
//!
//! Backed by [redb](https://docs.rs/redb), provides durable and
//! in-memory storage for tenant records and configuration documents.
//!
//! # Architecture
//!
//! Both record types are JSON-serialized into redb's `&[u8]` value
//! columns. Documents use composite keys (`{tenant_id}/{resource_name}`)
//! so the tenant + resource name pair maps to at most one row.
//!
//! Tenant operations each run in their own transaction. Document
//! mutations instead go through [`ConfigStore::with_documents`], which
//! hands the caller a transaction-scoped handle: the registry runs its
//! whole fetch-decode-mutate-persist sequence against one row inside a
//! single write transaction, and an error return aborts the transaction
//! with no partial effect.
//!
//! The `ConfigStore` is `Clone` + `Send` + `Sync` (backed by
//! `Arc<Database>`) and can be shared across async tasks.

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::{ConfigStore, DocumentTxn};
pub use types::{DocumentRecord, TenantRecord, document_key};
