use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use super::domain::{FoodItem, ItemDraft, ItemId, ItemStatus, ListFilter, NewFoodItem, Stats};
use super::errors::ListingError;
use super::events::{EventBus, ItemEvent};
use super::seed;
use super::store::ItemStore;
use crate::identity::Caller;

/// Listing business service independent of web framework and storage.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn ItemStore>,
    events: EventBus,
}

impl ListingService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store, events: EventBus::default() }
    }

    /// Receive an event after every successful create or claim.
    pub fn subscribe(&self) -> broadcast::Receiver<ItemEvent> { self.events.subscribe() }

    /// Persist a donor's listing as `available`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::listing::{ListingService, NewFoodItem, ItemStatus, store::memory::InMemoryItemStore};
    /// use service::Caller;
    /// let svc = ListingService::new(Arc::new(InMemoryItemStore::new()));
    /// let donor = uuid::Uuid::new_v4();
    /// let input = NewFoodItem {
    ///     title: "Bagels".into(), description: "Plain".into(), category: "Bakery".into(),
    ///     quantity: 6.0, unit: "pieces".into(), expiry_date: "2030-01-01".into(),
    ///     location: "Library".into(), image_url: None, allergens: vec!["Gluten".into()],
    /// };
    /// let id = tokio_test::block_on(svc.create_item(Caller::user(donor), input)).unwrap();
    /// let item = tokio_test::block_on(svc.get_item(id)).unwrap();
    /// assert_eq!(item.status, ItemStatus::Available);
    /// assert_eq!(item.donor_id, donor);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title, category = %input.category))]
    pub async fn create_item(&self, caller: Caller, input: NewFoodItem) -> Result<ItemId, ListingError> {
        let donor_id = caller.id().ok_or(ListingError::Unauthenticated("create food items"))?;
        let id = self.store.insert(ItemDraft::available(input, donor_id)).await?;
        info!(item_id = %id, donor_id = %donor_id, "food_item_created");
        self.events.publish(ItemEvent::Created { id, donor_id, status: ItemStatus::Available });
        Ok(id)
    }

    /// Status narrows through the store index; category and search are
    /// applied in memory afterwards.
    #[instrument(skip(self))]
    pub async fn list_items(&self, filter: &ListFilter) -> Result<Vec<FoodItem>, ListingError> {
        let mut items = match filter.status {
            Some(status) => self.store.list_by_status(status).await?,
            None => self.store.list_all().await?,
        };
        filter.retain(&mut items);
        debug!(count = items.len(), "list_items");
        Ok(items)
    }

    pub async fn get_item(&self, id: ItemId) -> Result<FoodItem, ListingError> {
        self.store.get_by_id(id).await?.ok_or(ListingError::NotFound)
    }

    /// Claim an available item for the caller.
    ///
    /// Checks run in order: authentication, existence, availability. The
    /// availability check and the transition are one conditional store
    /// write, so of two racing claimants exactly one wins and the other
    /// gets `Conflict`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::listing::{ListingService, ListingError, NewFoodItem, store::memory::InMemoryItemStore};
    /// use service::Caller;
    /// let svc = ListingService::new(Arc::new(InMemoryItemStore::new()));
    /// let input = NewFoodItem {
    ///     title: "Soup".into(), description: "Lentil".into(), category: "Prepared Foods".into(),
    ///     quantity: 4.0, unit: "servings".into(), expiry_date: "2030-01-01".into(),
    ///     location: "Hall 2".into(), image_url: None, allergens: vec![],
    /// };
    /// let id = tokio_test::block_on(svc.create_item(Caller::user(uuid::Uuid::new_v4()), input)).unwrap();
    /// let claimant = Caller::user(uuid::Uuid::new_v4());
    /// assert!(tokio_test::block_on(svc.claim_item(claimant, id)).is_ok());
    /// let again = tokio_test::block_on(svc.claim_item(claimant, id));
    /// assert_eq!(again.unwrap_err(), ListingError::Conflict);
    /// ```
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn claim_item(&self, caller: Caller, item_id: ItemId) -> Result<FoodItem, ListingError> {
        let user_id = caller.id().ok_or(ListingError::Unauthenticated("claim items"))?;
        let claimed = match self.store.claim(item_id, user_id, Utc::now()).await {
            Err(ListingError::Conflict) => {
                warn!(item_id = %item_id, "claim_rejected_not_available");
                return Err(ListingError::Conflict);
            }
            other => other?,
        };
        info!(item_id = %item_id, claimed_by = %user_id, "food_item_claimed");
        self.events.publish(ItemEvent::Claimed { id: item_id, claimed_by: user_id });
        Ok(claimed)
    }

    /// Listings created by the caller; empty for anonymous callers.
    pub async fn get_user_donations(&self, caller: Caller) -> Result<Vec<FoodItem>, ListingError> {
        match caller.id() {
            Some(id) => self.store.list_by_donor(id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Listings claimed by the caller; empty for anonymous callers.
    pub async fn get_user_claims(&self, caller: Caller) -> Result<Vec<FoodItem>, ListingError> {
        match caller.id() {
            Some(id) => self.store.list_by_claimant(id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_stats(&self) -> Result<Stats, ListingError> {
        let items = self.store.list_all().await?;
        Ok(Stats::from_items(&items))
    }

    /// Insert the demo listings donated by the caller in one batch, returning
    /// their ids in order. Either all five are stored or none.
    #[instrument(skip(self))]
    pub async fn seed_sample_items(&self, caller: Caller) -> Result<Vec<ItemId>, ListingError> {
        let donor_id = caller.id().ok_or(ListingError::Unauthenticated("seed data"))?;
        let drafts = seed::sample_items()
            .into_iter()
            .map(|item| ItemDraft::available(item, donor_id))
            .collect();
        let ids = self.store.insert_many(drafts).await?;
        for id in &ids {
            self.events.publish(ItemEvent::Created { id: *id, donor_id, status: ItemStatus::Available });
        }
        info!(count = ids.len(), donor_id = %donor_id, "sample_items_seeded");
        Ok(ids)
    }
}
