use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{FoodItem, FoodItemPatch, ItemDraft, ItemId, ItemStatus};
use super::errors::ListingError;
use crate::identity::UserId;

/// Data-access contract for food items.
///
/// Implementations must not interleave two patches to the same record;
/// nothing here needs ordering across records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn insert(&self, draft: ItemDraft) -> Result<ItemId, ListingError>;
    /// Insert every draft or none of them; ids come back in draft order.
    async fn insert_many(&self, drafts: Vec<ItemDraft>) -> Result<Vec<ItemId>, ListingError>;
    async fn get_by_id(&self, id: ItemId) -> Result<Option<FoodItem>, ListingError>;
    async fn list_all(&self) -> Result<Vec<FoodItem>, ListingError>;
    async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<FoodItem>, ListingError>;
    async fn list_by_donor(&self, donor_id: UserId) -> Result<Vec<FoodItem>, ListingError>;
    async fn list_by_claimant(&self, user_id: UserId) -> Result<Vec<FoodItem>, ListingError>;
    /// Merge the present fields of `patch`; `NotFound` if `id` is absent.
    async fn patch(&self, id: ItemId, patch: FoodItemPatch) -> Result<FoodItem, ListingError>;
    /// Move `id` from `available` to `claimed` in one conditional write.
    /// `NotFound` if absent, `Conflict` if it was not available at write time.
    async fn claim(&self, id: ItemId, by: UserId, at: DateTime<Utc>) -> Result<FoodItem, ListingError>;
}

/// In-process store for tests and `storage.backend = "memory"` runs.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    #[derive(Default)]
    struct Inner {
        items: HashMap<ItemId, FoodItem>,
        order: Vec<ItemId>, // insertion order for stable listings
    }

    impl Inner {
        fn collect(&self, keep: impl Fn(&FoodItem) -> bool) -> Vec<FoodItem> {
            self.order
                .iter()
                .filter_map(|id| self.items.get(id))
                .filter(|item| keep(item))
                .cloned()
                .collect()
        }
    }

    #[derive(Default)]
    pub struct InMemoryItemStore {
        inner: RwLock<Inner>,
    }

    impl InMemoryItemStore {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize { self.inner.read().await.items.len() }

        pub async fn is_empty(&self) -> bool { self.len().await == 0 }
    }

    #[async_trait]
    impl ItemStore for InMemoryItemStore {
        async fn insert(&self, draft: ItemDraft) -> Result<ItemId, ListingError> {
            let id = Uuid::new_v4();
            let mut inner = self.inner.write().await;
            inner.items.insert(id, draft.into_item(id));
            inner.order.push(id);
            Ok(id)
        }

        async fn insert_many(&self, drafts: Vec<ItemDraft>) -> Result<Vec<ItemId>, ListingError> {
            let mut inner = self.inner.write().await;
            let mut ids = Vec::with_capacity(drafts.len());
            for draft in drafts {
                let id = Uuid::new_v4();
                inner.items.insert(id, draft.into_item(id));
                inner.order.push(id);
                ids.push(id);
            }
            Ok(ids)
        }

        async fn get_by_id(&self, id: ItemId) -> Result<Option<FoodItem>, ListingError> {
            Ok(self.inner.read().await.items.get(&id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<FoodItem>, ListingError> {
            Ok(self.inner.read().await.collect(|_| true))
        }

        async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<FoodItem>, ListingError> {
            Ok(self.inner.read().await.collect(|i| i.status == status))
        }

        async fn list_by_donor(&self, donor_id: UserId) -> Result<Vec<FoodItem>, ListingError> {
            Ok(self.inner.read().await.collect(|i| i.donor_id == donor_id))
        }

        async fn list_by_claimant(&self, user_id: UserId) -> Result<Vec<FoodItem>, ListingError> {
            Ok(self.inner.read().await.collect(|i| i.claimed_by == Some(user_id)))
        }

        async fn patch(&self, id: ItemId, patch: FoodItemPatch) -> Result<FoodItem, ListingError> {
            let mut inner = self.inner.write().await;
            let item = inner.items.get_mut(&id).ok_or(ListingError::NotFound)?;
            patch.apply_to(item);
            Ok(item.clone())
        }

        async fn claim(&self, id: ItemId, by: UserId, at: DateTime<Utc>) -> Result<FoodItem, ListingError> {
            let mut inner = self.inner.write().await;
            let item = inner.items.get_mut(&id).ok_or(ListingError::NotFound)?;
            if !item.is_available() {
                return Err(ListingError::Conflict);
            }
            FoodItemPatch::claim(by, at).apply_to(item);
            Ok(item.clone())
        }
    }
}
