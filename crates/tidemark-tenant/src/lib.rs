//! tidemark-tenant — tenant lifecycle over the config store.
//!
//! The [`TenantDirectory`] owns tenant CRUD and publishes a
//! [`TenantStatusEvent`] through an [`EventSink`] after every
//! successful mutation, so downstream services can track tenant
//! lifecycle without polling. Event delivery is best-effort and never
//! blocks or fails the mutation path.

pub mod directory;
pub mod error;
pub mod events;

pub use directory::TenantDirectory;
pub use error::{TenantError, TenantResult};
pub use events::{BroadcastSink, EventSink, TenantEventKind, TenantStatusEvent};
