//! ConfigStore — redb-backed persistence for tenants and documents.
//!
//! Tenant operations are self-contained transactions. Document
//! mutations run through [`ConfigStore::with_documents`], which scopes
//! a whole read-modify-write sequence to one write transaction. The
//! store performs no retries; failures propagate verbatim to the
//! caller.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use tidemark_core::TenantId;

use crate::error::{StoreError, StoreResult};
use crate::tables::{DOCUMENTS, TENANTS};
use crate::types::{DocumentRecord, TenantRecord, document_key};

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe configuration store backed by redb.
#[derive(Clone)]
pub struct ConfigStore {
    db: Arc<Database>,
}

impl ConfigStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "config store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory config store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(TENANTS).map_err(map_err!(Table))?;
        txn.open_table(DOCUMENTS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Tenants ────────────────────────────────────────────────────

    /// Insert or update a tenant record.
    pub fn put_tenant(&self, record: &TenantRecord) -> StoreResult<()> {
        let key = record.table_key();
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(TENANTS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "tenant stored");
        Ok(())
    }

    /// Get a tenant by id.
    pub fn get_tenant(&self, id: TenantId) -> StoreResult<Option<TenantRecord>> {
        let key = id.to_string();
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TENANTS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: TenantRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List all tenants.
    pub fn list_tenants(&self) -> StoreResult<Vec<TenantRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TENANTS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: TenantRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        Ok(results)
    }

    /// Delete a tenant by id. Returns true if it existed.
    ///
    /// Only the tenant record is removed; the tenant's configuration
    /// documents are independent rows and survive until deleted through
    /// the document operations.
    pub fn delete_tenant(&self, id: TenantId) -> StoreResult<bool> {
        let key = id.to_string();
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(TENANTS).map_err(map_err!(Table))?;
            existed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, existed, "tenant deleted");
        Ok(existed)
    }

    // ── Documents ──────────────────────────────────────────────────

    /// Point lookup of a document by tenant and resource name.
    ///
    /// Read-only fast path; mutations go through [`Self::with_documents`].
    pub fn get_document(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
    ) -> StoreResult<Option<DocumentRecord>> {
        let key = document_key(tenant_id, resource_name);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(DOCUMENTS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: DocumentRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Run `f` against the documents table inside one write transaction.
    ///
    /// The closure receives a [`DocumentTxn`] handle; every `get`,
    /// `put`, and `delete` through it sees and touches the same
    /// transaction. The transaction commits when the closure returns
    /// `Ok`. On `Err` it is dropped without committing, discarding all
    /// writes, so a failed sequence has no partial effect.
    pub fn with_documents<T, E>(
        &self,
        f: impl FnOnce(&mut DocumentTxn<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| E::from(StoreError::Transaction(e.to_string())))?;
        let out;
        {
            let table = txn
                .open_table(DOCUMENTS)
                .map_err(|e| E::from(StoreError::Table(e.to_string())))?;
            let mut documents = DocumentTxn { table };
            out = f(&mut documents)?;
        }
        txn.commit()
            .map_err(|e| E::from(StoreError::Transaction(e.to_string())))?;
        Ok(out)
    }
}

/// Transaction-scoped handle over the documents table.
///
/// Obtained through [`ConfigStore::with_documents`]; lives only for the
/// duration of the enclosing write transaction.
pub struct DocumentTxn<'txn> {
    table: redb::Table<'txn, &'static str, &'static [u8]>,
}

impl DocumentTxn<'_> {
    /// Get a document by tenant and resource name.
    pub fn get(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
    ) -> StoreResult<Option<DocumentRecord>> {
        let key = document_key(tenant_id, resource_name);
        match self.table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: DocumentRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Insert or fully replace a document row.
    pub fn put(&mut self, record: &DocumentRecord) -> StoreResult<()> {
        let key = record.table_key();
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        self.table
            .insert(key.as_str(), value.as_slice())
            .map_err(map_err!(Write))?;
        Ok(())
    }

    /// Delete a document row. Returns true if it existed.
    pub fn delete(&mut self, tenant_id: TenantId, resource_name: &str) -> StoreResult<bool> {
        let key = document_key(tenant_id, resource_name);
        let existed = self
            .table
            .remove(key.as_str())
            .map_err(map_err!(Write))?
            .is_some();
        Ok(existed)
    }
}
