//! ResourceRegistry — item-level CRUD over shape-polymorphic documents.

use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use tidemark_core::TenantId;
use tidemark_document::{Item, Payload, Removal, Shape};
use tidemark_store::{ConfigStore, DocumentRecord};

use crate::error::{RegistryError, RegistryResult};

/// Item-level CRUD engine for per-tenant configuration documents.
///
/// A document is created implicitly on the first insert for a
/// (tenant, resource name) pair, as a singleton. The second insert
/// promotes it to a collection. Deleting a singleton by its own id
/// removes the whole document row; deleting from a collection filters
/// the array and keeps the row, even when the array ends up empty.
#[derive(Clone)]
pub struct ResourceRegistry {
    store: ConfigStore,
}

impl ResourceRegistry {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Insert an item, creating the document on first use.
    ///
    /// Returns the item as stored. Ids are caller-assigned; an id that
    /// is already addressable under this resource name is rejected with
    /// [`RegistryError::DuplicateId`].
    pub fn create(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
        item: Item,
    ) -> RegistryResult<Item> {
        let stored = self.store.with_documents(|docs| -> RegistryResult<Item> {
            match docs.get(tenant_id, resource_name)? {
                None => {
                    let record = DocumentRecord {
                        id: Uuid::new_v4(),
                        tenant_id,
                        resource_name: resource_name.to_string(),
                        payload: Payload::singleton(item.clone()).to_value(),
                    };
                    docs.put(&record)?;
                    debug!(%tenant_id, resource = resource_name, "document created");
                    Ok(item)
                }
                Some(mut record) => {
                    let mut payload = Payload::from_value(&record.payload)?;
                    payload.insert(item.clone())?;
                    record.payload = payload.to_value();
                    docs.put(&record)?;
                    Ok(item)
                }
            }
        })?;
        info!(
            %tenant_id,
            resource = resource_name,
            id = %stored.id,
            "item created"
        );
        Ok(stored)
    }

    /// Replace the item addressed by `id`.
    ///
    /// The path id is authoritative: it is forced into the submitted
    /// item, overriding any embedded id. There is no upsert; a missing
    /// document or item is [`RegistryError::NotFound`].
    pub fn update(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
        id: &str,
        mut item: Item,
    ) -> RegistryResult<Item> {
        item.id = id.to_string();
        let stored = self.store.with_documents(|docs| -> RegistryResult<Item> {
            let mut record = docs
                .get(tenant_id, resource_name)?
                .ok_or_else(|| not_found_document(tenant_id, resource_name))?;
            let mut payload = Payload::from_value(&record.payload)?;
            if !payload.replace(id, item.clone()) {
                return Err(not_found_item(resource_name, id));
            }
            record.payload = payload.to_value();
            docs.put(&record)?;
            Ok(item)
        })?;
        info!(
            %tenant_id,
            resource = resource_name,
            id = %stored.id,
            "item updated"
        );
        Ok(stored)
    }

    /// Delete the item addressed by `id`.
    ///
    /// Collection documents are rewritten with every matching element
    /// filtered out; the row survives even when the array ends up
    /// empty. A singleton document matching on its own id is deleted
    /// wholesale.
    pub fn delete(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
        id: &str,
    ) -> RegistryResult<()> {
        self.store.with_documents(|docs| -> RegistryResult<()> {
            let mut record = docs
                .get(tenant_id, resource_name)?
                .ok_or_else(|| not_found_document(tenant_id, resource_name))?;
            let mut payload = Payload::from_value(&record.payload)?;
            match payload.remove(id) {
                Removal::NotFound => Err(not_found_item(resource_name, id)),
                Removal::Filtered => {
                    record.payload = payload.to_value();
                    docs.put(&record)?;
                    Ok(())
                }
                Removal::WholeDocument => {
                    docs.delete(tenant_id, resource_name)?;
                    debug!(%tenant_id, resource = resource_name, "document deleted");
                    Ok(())
                }
            }
        })?;
        info!(%tenant_id, resource = resource_name, id, "item deleted");
        Ok(())
    }

    /// Get the item addressed by `id`.
    pub fn get_by_id(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
        id: &str,
    ) -> RegistryResult<Item> {
        let record = self
            .store
            .get_document(tenant_id, resource_name)?
            .ok_or_else(|| not_found_document(tenant_id, resource_name))?;
        let payload = Payload::from_value(&record.payload)?;
        let object = payload
            .find(id)
            .ok_or_else(|| not_found_item(resource_name, id))?;
        Ok(Item::from_object(object.clone())?)
    }

    /// List all items under a resource name, in stored order.
    ///
    /// A tenant with no document for this resource name lists as empty
    /// rather than erroring, so listing is idempotent against an
    /// uninitialized tenant.
    pub fn get_all(
        &self,
        tenant_id: TenantId,
        resource_name: &str,
    ) -> RegistryResult<Vec<Map<String, Value>>> {
        match self.store.get_document(tenant_id, resource_name)? {
            None => {
                debug!(%tenant_id, resource = resource_name, shape = ?Shape::Empty, "listing");
                Ok(Vec::new())
            }
            Some(record) => {
                let payload = Payload::from_value(&record.payload)?;
                debug!(
                    %tenant_id,
                    resource = resource_name,
                    shape = ?payload.shape(),
                    "listing"
                );
                Ok(payload.items())
            }
        }
    }
}

fn not_found_document(tenant_id: TenantId, resource_name: &str) -> RegistryError {
    RegistryError::NotFound(format!("document {tenant_id}/{resource_name}"))
}

fn not_found_item(resource_name: &str, id: &str) -> RegistryError {
    RegistryError::NotFound(format!("{resource_name} item {id}"))
}
