//! TenantDirectory — tenant CRUD with status event emission.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use tidemark_core::{TenantId, unix_now};
use tidemark_store::{ConfigStore, TenantRecord};

use crate::error::{TenantError, TenantResult};
use crate::events::{EventSink, TenantEventKind, TenantStatusEvent};

/// Tenant lifecycle operations over the config store.
///
/// Every successful mutation publishes one [`TenantStatusEvent`]
/// through the sink; failed mutations publish nothing. Deleting a
/// tenant does not cascade into its configuration documents — those
/// rows stay addressable through the registry until removed there.
#[derive(Clone)]
pub struct TenantDirectory {
    store: ConfigStore,
    events: Arc<dyn EventSink>,
}

impl TenantDirectory {
    pub fn new(store: ConfigStore, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    /// Register a new tenant. The id is assigned here, never by the
    /// caller.
    pub fn create(
        &self,
        name: &str,
        region: &str,
        major_version: u16,
        minor_version: u16,
    ) -> TenantResult<TenantRecord> {
        let now = unix_now();
        let record = TenantRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            region: region.to_string(),
            major_version,
            minor_version,
            created_at: now,
            updated_at: now,
        };
        self.store.put_tenant(&record)?;
        self.events
            .publish(TenantStatusEvent::for_record(&record, TenantEventKind::Created));
        info!(tenant_id = %record.id, name, region, "tenant created");
        Ok(record)
    }

    /// Update an existing tenant's attributes.
    pub fn update(
        &self,
        id: TenantId,
        name: &str,
        region: &str,
        major_version: u16,
        minor_version: u16,
    ) -> TenantResult<TenantRecord> {
        let mut record = self
            .store
            .get_tenant(id)?
            .ok_or(TenantError::NotFound(id))?;

        record.name = name.to_string();
        record.region = region.to_string();
        record.major_version = major_version;
        record.minor_version = minor_version;
        record.updated_at = unix_now();

        self.store.put_tenant(&record)?;
        self.events
            .publish(TenantStatusEvent::for_record(&record, TenantEventKind::Updated));
        info!(tenant_id = %record.id, name, region, "tenant updated");
        Ok(record)
    }

    /// Delete a tenant by id.
    pub fn delete(&self, id: TenantId) -> TenantResult<()> {
        let record = self
            .store
            .get_tenant(id)?
            .ok_or(TenantError::NotFound(id))?;

        self.store.delete_tenant(id)?;
        self.events
            .publish(TenantStatusEvent::for_record(&record, TenantEventKind::Deleted));
        info!(tenant_id = %id, name = %record.name, "tenant deleted");
        Ok(())
    }

    /// Get a tenant by id.
    pub fn get(&self, id: TenantId) -> TenantResult<TenantRecord> {
        self.store
            .get_tenant(id)?
            .ok_or(TenantError::NotFound(id))
    }

    /// List all tenants.
    pub fn list(&self) -> TenantResult<Vec<TenantRecord>> {
        Ok(self.store.list_tenants()?)
    }
}
