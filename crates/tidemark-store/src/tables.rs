//! redb table definitions for the Tidemark store.
//!
//! Both tables use `&str` keys and `&[u8]` values (JSON-serialized
//! records). Document keys are composite: `{tenant_id}/{resource_name}`.

use redb::TableDefinition;

/// Tenant records keyed by `{tenant_id}`.
pub const TENANTS: TableDefinition<&str, &[u8]> = TableDefinition::new("tenants");

/// Configuration documents keyed by `{tenant_id}/{resource_name}`.
pub const DOCUMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");
