use std::sync::{Arc, Mutex};

use crate::models::Organization;
use crate::selection::SelectionStore;

/// In-memory SelectionStore for testing and ephemeral sessions.
///
/// Holds the serialized record rather than the struct so the round-trip
/// behaves exactly like the durable backends.
#[derive(Clone, Debug, Default)]
pub struct MemorySelection {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelection {
    async fn save(&self, organization: &Organization) {
        match serde_json::to_string(organization) {
            Ok(raw) => *self.slot.lock().unwrap() = Some(raw),
            Err(e) => tracing::warn!("failed to serialize organization selection: {}", e),
        }
    }

    async fn load(&self) -> Option<Organization> {
        let raw = self.slot.lock().unwrap().clone()?;
        serde_json::from_str(&raw).ok()
    }
}
