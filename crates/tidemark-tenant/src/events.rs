//! Tenant status events.
//!
//! One event is published after every successful tenant mutation. The
//! default sink fans events out over a tokio broadcast channel;
//! subscribers that lag or disconnect never block the mutation path.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use tidemark_core::TenantId;
use tidemark_store::TenantRecord;

/// What happened to the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantEventKind {
    Created,
    Updated,
    Deleted,
}

/// Lifecycle notification for one tenant mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStatusEvent {
    pub tenant_id: TenantId,
    #[serde(rename = "type")]
    pub kind: TenantEventKind,
    pub name: String,
    pub region: String,
    pub major_version: u16,
    pub minor_version: u16,
}

impl TenantStatusEvent {
    /// Build the event for a record that was just mutated.
    pub fn for_record(record: &TenantRecord, kind: TenantEventKind) -> Self {
        TenantStatusEvent {
            tenant_id: record.id,
            kind,
            name: record.name.clone(),
            region: record.region.clone(),
            major_version: record.major_version,
            minor_version: record.minor_version,
        }
    }
}

/// Downstream consumer of tenant status events.
///
/// Delivery is best-effort; implementations must not block.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: TenantStatusEvent);
}

/// Broadcast-channel sink, the in-process default.
pub struct BroadcastSink {
    tx: broadcast::Sender<TenantStatusEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<TenantStatusEvent> {
        self.tx.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, event: TenantStatusEvent) {
        // Send only fails when no receiver is subscribed; events are
        // droppable in that case.
        let _ = self.tx.send(event);
    }
}
