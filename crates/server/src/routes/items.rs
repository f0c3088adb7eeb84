use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use common::types::Success;
use service::listing::{FoodItem, ItemId, ItemStatus, ListFilter, NewFoodItem, Stats};

use crate::errors::JsonApiError;
use crate::identity::CurrentCaller;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// `available`, `claimed` or `expired`.
    #[param(value_type = Option<String>)]
    pub status: Option<ItemStatus>,
    /// Exact category; `all` disables the filter.
    pub category: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl From<ListQuery> for ListFilter {
    fn from(q: ListQuery) -> Self {
        ListFilter { status: q.status, category: q.category, search: q.search }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedItem {
    pub id: ItemId,
}

pub const SEED_MESSAGE: &str = "Sample food items created successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededItems {
    pub message: String,
    pub item_ids: Vec<ItemId>,
}

#[utoipa::path(
    get,
    path = "/api/items",
    params(ListQuery),
    responses((status = 200, body = [crate::openapi::FoodItemDoc])),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<ServerState>,
    WithRejection(Query(q), _): WithRejection<Query<ListQuery>, JsonApiError>,
) -> Result<Json<Vec<FoodItem>>, JsonApiError> {
    let items = state.listings.list_items(&q.into()).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = crate::openapi::NewFoodItemDoc,
    responses(
        (status = 201, body = crate::openapi::CreatedItemDoc),
        (status = 401, body = crate::openapi::ErrorDoc)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
    WithRejection(Json(input), _): WithRejection<Json<NewFoodItem>, JsonApiError>,
) -> Result<(StatusCode, Json<CreatedItem>), JsonApiError> {
    let id = state.listings.create_item(caller, input).await?;
    Ok((StatusCode::CREATED, Json(CreatedItem { id })))
}

#[utoipa::path(
    post,
    path = "/api/items/seed",
    responses(
        (status = 200, body = crate::openapi::SeededItemsDoc),
        (status = 401, body = crate::openapi::ErrorDoc)
    ),
    tag = "items"
)]
pub async fn seed_items(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<SeededItems>, JsonApiError> {
    let item_ids = state.listings.seed_sample_items(caller).await?;
    info!(count = item_ids.len(), "seed request served");
    Ok(Json(SeededItems { message: SEED_MESSAGE.to_string(), item_ids }))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, body = crate::openapi::FoodItemDoc),
        (status = 404, body = crate::openapi::ErrorDoc)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<FoodItem>, JsonApiError> {
    Ok(Json(state.listings.get_item(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/items/{id}/claim",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, body = crate::openapi::SuccessDoc),
        (status = 401, body = crate::openapi::ErrorDoc),
        (status = 404, body = crate::openapi::ErrorDoc),
        (status = 409, body = crate::openapi::ErrorDoc)
    ),
    tag = "items"
)]
pub async fn claim_item(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<Success>, JsonApiError> {
    state.listings.claim_item(caller, id).await?;
    Ok(Json(Success::default()))
}

#[utoipa::path(get, path = "/api/stats", responses((status = 200, body = crate::openapi::StatsDoc)), tag = "items")]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<Stats>, JsonApiError> {
    Ok(Json(state.listings.get_stats().await?))
}
