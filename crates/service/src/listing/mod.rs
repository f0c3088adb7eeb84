//! Listing module: three-layer architecture (domain, store, service).
//!
//! Owns the food-item lifecycle. The only state change is the claim
//! transition `available -> claimed`.

pub mod domain;
pub mod errors;
pub mod events;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use domain::{FoodItem, FoodItemPatch, ItemDraft, ItemId, ItemStatus, ListFilter, NewFoodItem, Stats};
pub use errors::ListingError;
pub use events::ItemEvent;
pub use service::ListingService;
pub use store::ItemStore;
