use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::catalog::Catalog;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod items;
pub mod users;

#[utoipa::path(get, path = "/health", responses((status = 200, body = crate::openapi::HealthResponse)), tag = "health")]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Suggested categories, units and allergens for the listing form.
#[utoipa::path(get, path = "/api/catalog", responses((status = 200, body = crate::openapi::CatalogDoc)), tag = "items")]
pub async fn catalog() -> Json<Catalog> {
    Json(Catalog::default())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router over shared service state.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/catalog", get(catalog))
        .route("/api-docs/openapi.json", get(openapi_json));

    let listing = Router::new()
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route("/api/items/seed", post(items::seed_items))
        .route("/api/items/:id", get(items::get_item))
        .route("/api/items/:id/claim", post(items::claim_item))
        .route("/api/stats", get(items::stats));

    let me = Router::new()
        .route("/api/me", get(users::me).patch(users::update_me))
        .route("/api/me/donations", get(users::my_donations))
        .route("/api/me/claims", get(users::my_claims))
        .route("/api/demo-login", post(users::demo_login));

    public
        .merge(listing)
        .merge(me)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
