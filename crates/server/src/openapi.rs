//! OpenAPI document. Schemas here mirror the wire shapes of the service
//! types without pulling utoipa into the service crate.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SuccessDoc { pub success: bool }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: String, pub code: u16 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDoc {
    pub categories: Vec<String>,
    pub units: Vec<String>,
    pub allergens: Vec<String>,
    pub all_categories: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    /// `YYYY-MM-DD`
    pub expiry_date: String,
    pub location: String,
    pub image_url: Option<String>,
    pub allergens: Vec<String>,
    pub donor_id: Uuid,
    /// `available`, `claimed` or `expired`
    pub status: String,
    pub claimed_by: Option<Uuid>,
    /// RFC 3339 timestamp
    pub claimed_at: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodItemDoc {
    pub title: String,
    pub description: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: String,
    pub location: String,
    pub image_url: Option<String>,
    pub allergens: Vec<String>,
}

#[derive(ToSchema)]
pub struct CreatedItemDoc { pub id: Uuid }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeededItemsDoc { pub message: String, pub item_ids: Vec<Uuid> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDoc {
    pub total_donated: u64,
    pub total_claimed: u64,
    pub total_available: u64,
    pub waste_prevented_kg: f64,
}

#[derive(ToSchema)]
pub struct UserProfileDoc { pub id: Uuid, pub email: Option<String>, pub name: Option<String> }

#[derive(ToSchema)]
pub struct ProfilePatchDoc { pub email: Option<String>, pub name: Option<String> }

#[derive(ToSchema)]
pub struct DemoLoginDoc { pub email: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::catalog,
        crate::routes::items::list_items,
        crate::routes::items::create_item,
        crate::routes::items::seed_items,
        crate::routes::items::get_item,
        crate::routes::items::claim_item,
        crate::routes::items::stats,
        crate::routes::users::me,
        crate::routes::users::update_me,
        crate::routes::users::my_donations,
        crate::routes::users::my_claims,
        crate::routes::users::demo_login,
    ),
    components(
        schemas(
            HealthResponse,
            SuccessDoc,
            ErrorDoc,
            CatalogDoc,
            FoodItemDoc,
            NewFoodItemDoc,
            CreatedItemDoc,
            SeededItemsDoc,
            StatsDoc,
            UserProfileDoc,
            ProfilePatchDoc,
            DemoLoginDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items"),
        (name = "me")
    )
)]
pub struct ApiDoc;
