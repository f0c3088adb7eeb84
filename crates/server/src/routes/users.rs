use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use common::types::Success;
use service::listing::FoodItem;
use service::users::domain::{DemoLoginInput, ProfilePatch, UserProfile};

use crate::errors::JsonApiError;
use crate::identity::CurrentCaller;
use crate::state::ServerState;

/// The caller's profile; `null` when anonymous or never set.
#[utoipa::path(get, path = "/api/me", responses((status = 200, description = "Profile, or null", body = crate::openapi::UserProfileDoc)), tag = "me")]
pub async fn me(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Option<UserProfile>>, JsonApiError> {
    Ok(Json(state.users.current_user(caller).await?))
}

#[utoipa::path(
    patch,
    path = "/api/me",
    request_body = crate::openapi::ProfilePatchDoc,
    responses(
        (status = 200, body = crate::openapi::SuccessDoc),
        (status = 401, body = crate::openapi::ErrorDoc)
    ),
    tag = "me"
)]
pub async fn update_me(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
    WithRejection(Json(patch), _): WithRejection<Json<ProfilePatch>, JsonApiError>,
) -> Result<Json<Success>, JsonApiError> {
    state.users.set_profile(caller, patch).await?;
    Ok(Json(Success::default()))
}

#[utoipa::path(get, path = "/api/me/donations", responses((status = 200, body = [crate::openapi::FoodItemDoc])), tag = "me")]
pub async fn my_donations(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<FoodItem>>, JsonApiError> {
    Ok(Json(state.listings.get_user_donations(caller).await?))
}

#[utoipa::path(get, path = "/api/me/claims", responses((status = 200, body = [crate::openapi::FoodItemDoc])), tag = "me")]
pub async fn my_claims(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<FoodItem>>, JsonApiError> {
    Ok(Json(state.listings.get_user_claims(caller).await?))
}

#[utoipa::path(
    post,
    path = "/api/demo-login",
    request_body = crate::openapi::DemoLoginDoc,
    responses(
        (status = 200, body = crate::openapi::SuccessDoc),
        (status = 400, body = crate::openapi::ErrorDoc),
        (status = 401, body = crate::openapi::ErrorDoc)
    ),
    tag = "me"
)]
pub async fn demo_login(
    State(state): State<ServerState>,
    CurrentCaller(caller): CurrentCaller,
    WithRejection(Json(input), _): WithRejection<Json<DemoLoginInput>, JsonApiError>,
) -> Result<Json<Success>, JsonApiError> {
    state.users.record_demo_login(caller, input).await?;
    Ok(Json(Success::default()))
}
