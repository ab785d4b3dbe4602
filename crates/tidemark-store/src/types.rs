//! Persisted record types for the Tidemark store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tidemark_core::TenantId;
use uuid::Uuid;

/// A registered tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantRecord {
    pub id: TenantId,
    pub name: String,
    pub region: String,
    pub major_version: u16,
    pub minor_version: u16,
    /// Unix timestamp (seconds) when this tenant was registered.
    pub created_at: u64,
    /// Unix timestamp (seconds) of the last update.
    pub updated_at: u64,
}

/// One configuration document: all items of one resource name belonging
/// to one tenant.
///
/// The payload is the raw `{"data": <object>|<array>}` value, stored
/// verbatim. Shape classification happens in `tidemark-document` on
/// every read; it is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    /// Row identity, assigned on first insert.
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub resource_name: String,
    pub payload: Value,
}

impl TenantRecord {
    /// Build the key for the tenants table.
    pub fn table_key(&self) -> String {
        self.id.to_string()
    }
}

impl DocumentRecord {
    /// Build the composite key for the documents table.
    pub fn table_key(&self) -> String {
        document_key(self.tenant_id, &self.resource_name)
    }
}

/// Composite key for the documents table. At most one document exists
/// per (tenant, resource name) pair.
pub fn document_key(tenant_id: TenantId, resource_name: &str) -> String {
    format!("{tenant_id}/{resource_name}")
}
