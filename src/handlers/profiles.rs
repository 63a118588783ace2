// handlers/profiles.rs - /profiles

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;

use crate::api::{parse_id, ApiResponse, ApiResult, RestoreQuery};
use crate::database::models::{CustomerWithGrants, NewProfile, Profile};
use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;

/// GET /profiles
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Profile>> {
    Ok(ApiResponse::success(ProfileService::new(&state.db).list().await?))
}

/// GET /profiles/:id - the customer with this id, its grants and each grant's profile
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CustomerWithGrants> {
    let id = parse_id(&id, "id")?;
    Ok(ApiResponse::success(ProfileService::new(&state.db).customer_profile(id).await?))
}

/// POST /profiles
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(payload) = body?;
    let profile: NewProfile = ApiError::parse_payload(payload)?;
    Ok(ApiResponse::created(ProfileService::new(&state.db).create(profile).await?))
}

/// PUT /profiles/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Profile> {
    let id = parse_id(&id, "id")?;
    let Json(payload) = body?;
    let changes: NewProfile = ApiError::parse_payload(payload)?;
    let profile = ProfileService::new(&state.db).update(id, changes).await?;
    Ok(ApiResponse::success(profile).with_message("Profile updated successfully!"))
}

/// DELETE /profiles/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "id")?;
    ProfileService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::message("Profile deleted successfully!"))
}

/// GET /profiles/restore?id=
pub async fn restore(
    State(state): State<AppState>,
    query: Result<Query<RestoreQuery>, QueryRejection>,
) -> ApiResult<Profile> {
    let Query(query) = query?;
    let id = query.require_id()?;
    let profile = ProfileService::new(&state.db).restore(id).await?;
    Ok(ApiResponse::success(profile).with_message("Profile restored successfully!"))
}
