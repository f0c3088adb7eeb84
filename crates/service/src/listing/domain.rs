use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ALL_CATEGORIES;
use crate::identity::UserId;

pub use models::food_item::ItemStatus;

pub type ItemId = Uuid;

/// Estimated mass rescued per claimed item, in kilograms. Deliberately not
/// derived from an item's own quantity or unit.
pub const WASTE_KG_PER_CLAIMED_ITEM: f64 = 0.5;

/// Days before expiry at which a listing counts as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 2;

/// A food listing as seen by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    /// Wall-clock date, `YYYY-MM-DD`, kept exactly as submitted.
    pub expiry_date: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub donor_id: UserId,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

impl FoodItem {
    /// Whole days from `today` until the expiry date; negative once past.
    /// `None` when the stored date does not parse.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        let expiry = NaiveDate::parse_from_str(self.expiry_date.trim(), "%Y-%m-%d").ok()?;
        Some((expiry - today).num_days())
    }

    /// Display hint only; never changes `status`.
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        matches!(self.days_until_expiry(today), Some(d) if d <= EXPIRING_SOON_DAYS)
    }

    pub fn is_available(&self) -> bool { self.status == ItemStatus::Available }
}

/// Donor-submitted fields. Copied verbatim; ranges, dates and categories are
/// the submitting client's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// What the store receives on insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub fields: NewFoodItem,
    pub donor_id: UserId,
    pub status: ItemStatus,
}

impl ItemDraft {
    pub fn available(fields: NewFoodItem, donor_id: UserId) -> Self {
        Self { fields, donor_id, status: ItemStatus::Available }
    }

    pub fn into_item(self, id: ItemId) -> FoodItem {
        let f = self.fields;
        FoodItem {
            id,
            title: f.title,
            description: f.description,
            category: f.category,
            quantity: f.quantity,
            unit: f.unit,
            expiry_date: f.expiry_date,
            location: f.location,
            image_url: f.image_url,
            allergens: f.allergens,
            donor_id: self.donor_id,
            status: self.status,
            claimed_by: None,
            claimed_at: None,
        }
    }
}

/// Partial update: each field is applied only when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodItemPatch {
    pub status: Option<ItemStatus>,
    pub claimed_by: Option<UserId>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl FoodItemPatch {
    pub fn claim(by: UserId, at: DateTime<Utc>) -> Self {
        Self { status: Some(ItemStatus::Claimed), claimed_by: Some(by), claimed_at: Some(at) }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.claimed_by.is_none() && self.claimed_at.is_none()
    }

    pub fn apply_to(&self, item: &mut FoodItem) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(by) = self.claimed_by {
            item.claimed_by = Some(by);
        }
        if let Some(at) = self.claimed_at {
            item.claimed_at = Some(at);
        }
    }
}

/// Listing query. `category == "all"` and an empty `search` behave as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ListFilter {
    pub fn status(status: ItemStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// In-memory part of the filter, applied after the status lookup.
    pub fn retain(&self, items: &mut Vec<FoodItem>) {
        if let Some(category) = self.category_filter() {
            items.retain(|item| item.category == category);
        }
        if let Some(term) = self.search_term() {
            items.retain(|item| {
                item.title.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
            });
        }
    }
}

/// Dashboard aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_donated: u64,
    pub total_claimed: u64,
    pub total_available: u64,
    pub waste_prevented_kg: f64,
}

impl Stats {
    pub fn from_items(items: &[FoodItem]) -> Self {
        let total_claimed = items.iter().filter(|i| i.status == ItemStatus::Claimed).count() as u64;
        let total_available = items.iter().filter(|i| i.status == ItemStatus::Available).count() as u64;
        Self {
            total_donated: items.len() as u64,
            total_claimed,
            total_available,
            waste_prevented_kg: total_claimed as f64 * WASTE_KG_PER_CLAIMED_ITEM,
        }
    }
}
