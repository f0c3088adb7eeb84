use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionError, TransactionTrait,
};
use uuid::Uuid;

use models::food_item::{self, Allergens};

use crate::identity::UserId;
use crate::listing::domain::{FoodItem, FoodItemPatch, ItemDraft, ItemId, ItemStatus};
use crate::listing::errors::ListingError;
use crate::listing::store::ItemStore;

/// PostgreSQL-backed store. Row-level atomicity of `UPDATE` keeps patches to
/// one record from interleaving.
pub struct SeaOrmItemStore {
    pub db: DatabaseConnection,
}

impl SeaOrmItemStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn fetch(&self, query: Select<food_item::Entity>) -> Result<Vec<FoodItem>, ListingError> {
        let rows = query
            .order_by_asc(food_item::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(FoodItem::from).collect())
    }
}

impl From<food_item::Model> for FoodItem {
    fn from(m: food_item::Model) -> Self {
        FoodItem {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            quantity: m.quantity,
            unit: m.unit,
            expiry_date: m.expiry_date,
            location: m.location,
            image_url: m.image_url,
            allergens: m.allergens.0,
            donor_id: m.donor_id,
            status: m.status,
            claimed_by: m.claimed_by,
            claimed_at: m.claimed_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

fn to_active_model(draft: ItemDraft) -> food_item::ActiveModel {
    let f = draft.fields;
    food_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(f.title),
        description: Set(f.description),
        category: Set(f.category),
        quantity: Set(f.quantity),
        unit: Set(f.unit),
        expiry_date: Set(f.expiry_date),
        location: Set(f.location),
        image_url: Set(f.image_url),
        allergens: Set(Allergens(f.allergens)),
        donor_id: Set(draft.donor_id),
        status: Set(draft.status),
        claimed_by: Set(None),
        claimed_at: Set(None),
        created_at: Set(Utc::now().into()),
    }
}

#[async_trait]
impl ItemStore for SeaOrmItemStore {
    async fn insert(&self, draft: ItemDraft) -> Result<ItemId, ListingError> {
        let created = to_active_model(draft).insert(&self.db).await?;
        Ok(created.id)
    }

    async fn insert_many(&self, drafts: Vec<ItemDraft>) -> Result<Vec<ItemId>, ListingError> {
        let models: Vec<food_item::ActiveModel> = drafts.into_iter().map(to_active_model).collect();
        self.db
            .transaction::<_, Vec<ItemId>, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let mut ids = Vec::with_capacity(models.len());
                    for am in models {
                        ids.push(am.insert(txn).await?.id);
                    }
                    Ok(ids)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => ListingError::from(e),
            })
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<FoodItem>, ListingError> {
        let found = food_item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(FoodItem::from))
    }

    async fn list_all(&self) -> Result<Vec<FoodItem>, ListingError> {
        self.fetch(food_item::Entity::find()).await
    }

    async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<FoodItem>, ListingError> {
        self.fetch(food_item::Entity::find().filter(food_item::Column::Status.eq(status))).await
    }

    async fn list_by_donor(&self, donor_id: UserId) -> Result<Vec<FoodItem>, ListingError> {
        self.fetch(food_item::Entity::find().filter(food_item::Column::DonorId.eq(donor_id))).await
    }

    async fn list_by_claimant(&self, user_id: UserId) -> Result<Vec<FoodItem>, ListingError> {
        self.fetch(food_item::Entity::find().filter(food_item::Column::ClaimedBy.eq(user_id))).await
    }

    async fn patch(&self, id: ItemId, patch: FoodItemPatch) -> Result<FoodItem, ListingError> {
        let found = food_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ListingError::NotFound)?;
        if patch.is_empty() {
            return Ok(found.into());
        }
        let mut am: food_item::ActiveModel = found.into();
        if let Some(status) = patch.status {
            am.status = Set(status);
        }
        if let Some(by) = patch.claimed_by {
            am.claimed_by = Set(Some(by));
        }
        if let Some(at) = patch.claimed_at {
            am.claimed_at = Set(Some(at.into()));
        }
        let updated = am.update(&self.db).await?;
        Ok(updated.into())
    }

    /// `UPDATE .. WHERE id = $1 AND status = 'available'`: the row lock makes
    /// the first committed claim win and every later one match zero rows.
    async fn claim(&self, id: ItemId, by: UserId, at: DateTime<Utc>) -> Result<FoodItem, ListingError> {
        let changes = food_item::ActiveModel {
            status: Set(ItemStatus::Claimed),
            claimed_by: Set(Some(by)),
            claimed_at: Set(Some(at.into())),
            ..Default::default()
        };
        let res = food_item::Entity::update_many()
            .set(changes)
            .filter(food_item::Column::Id.eq(id))
            .filter(food_item::Column::Status.eq(ItemStatus::Available))
            .exec(&self.db)
            .await?;
        let current = food_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ListingError::NotFound)?;
        if res.rows_affected == 0 {
            return Err(ListingError::Conflict);
        }
        Ok(current.into())
    }
}
