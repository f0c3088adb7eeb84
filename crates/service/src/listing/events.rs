//! Change notifications for listing mutations.
//!
//! Subscribers re-query or apply the event themselves; delivery to remote
//! clients is someone else's job.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::domain::{ItemId, ItemStatus};
use crate::identity::UserId;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemEvent {
    #[serde(rename_all = "camelCase")]
    Created { id: ItemId, donor_id: UserId, status: ItemStatus },
    #[serde(rename_all = "camelCase")]
    Claimed { id: ItemId, claimed_by: UserId },
}

impl ItemEvent {
    pub fn item_id(&self) -> ItemId {
        match self {
            ItemEvent::Created { id, .. } | ItemEvent::Claimed { id, .. } => *id,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ItemEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl EventBus {
    pub fn subscribe(&self) -> broadcast::Receiver<ItemEvent> { self.tx.subscribe() }

    /// Best effort: having no subscribers is normal.
    pub fn publish(&self, event: ItemEvent) {
        let item_id = event.item_id();
        match self.tx.send(event) {
            Ok(n) => debug!(%item_id, subscribers = n, "item_event_published"),
            Err(_) => debug!(%item_id, "item_event_dropped_no_subscribers"),
        }
    }
}
