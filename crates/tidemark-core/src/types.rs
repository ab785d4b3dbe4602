//! Shared types used across Tidemark crates.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Opaque tenant identifier. Assigned by the tenant directory on
/// registration, never derived from tenant attributes.
pub type TenantId = Uuid;

/// Current unix timestamp in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
