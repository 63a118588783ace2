// handlers/users.rs - /users

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::api::{parse_id, ApiResponse, ApiResult, RestoreQuery, UserReadQuery};
use crate::config::config;
use crate::database::models::{NewUser, User, UserChanges, UserRecord};
use crate::database::{Include, IncludeSet};
use crate::error::ApiError;
use crate::services::{Page, UserPage, UserService};
use crate::state::AppState;

/// A single create returns the user, a batch returns the list
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Created {
    One(User),
    Many(Vec<User>),
}

/// POST /users - create one user, or several when the body is an array of more than one
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Created> {
    let Json(payload) = body?;
    let service = UserService::new(&state.db);

    let created = match payload {
        Value::Array(items) if items.len() > 1 => {
            let users: Vec<NewUser> = ApiError::parse_payload(Value::Array(items))?;
            Created::Many(service.create_many(users).await?)
        }
        Value::Array(mut items) => {
            let Some(item) = items.pop() else {
                return Err(ApiError::bad_request("Payload must not be empty"));
            };
            Created::One(service.create(ApiError::parse_payload(item)?).await?)
        }
        other => Created::One(service.create(ApiError::parse_payload(other)?).await?),
    };

    Ok(ApiResponse::created(created).with_message("user is created"))
}

fn page_from(query: &UserReadQuery) -> Page {
    Page {
        limit: config().page_size(query.limit),
        offset: query.offset.unwrap_or(0).max(0),
    }
}

/// GET /users?include=contacts,subjects&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<UserReadQuery>, QueryRejection>,
) -> ApiResult<UserPage> {
    let Query(query) = query?;
    let include = IncludeSet::parse(query.include.as_deref(), IncludeSet::only(Include::Contacts))?;
    let page = UserService::new(&state.db).list(&include, page_from(&query)).await?;
    Ok(ApiResponse::success(page))
}

/// GET /users/subjects - users with their subjects
pub async fn list_with_subjects(
    State(state): State<AppState>,
    query: Result<Query<UserReadQuery>, QueryRejection>,
) -> ApiResult<UserPage> {
    let Query(query) = query?;
    let page = UserService::new(&state.db)
        .list(&IncludeSet::only(Include::Subjects), page_from(&query))
        .await?;
    Ok(ApiResponse::success(page))
}

/// GET /users/:id?include=contacts,subjects
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UserReadQuery>, QueryRejection>,
) -> ApiResult<UserRecord> {
    let id = parse_id(&id, "id")?;
    let Query(query) = query?;
    let include = IncludeSet::parse(query.include.as_deref(), IncludeSet::only(Include::Contacts))?;
    let user = UserService::new(&state.db).find(id, &include).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /users/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let id = parse_id(&id, "id")?;
    let Json(payload) = body?;
    let changes: UserChanges = ApiError::parse_payload(payload)?;
    if changes.is_empty() {
        return Err(ApiError::validation_error("No updatable fields provided", None));
    }
    let user = UserService::new(&state.db).update(id, changes).await?;
    Ok(ApiResponse::success(user).with_message("User updated successfully!"))
}

/// DELETE /users/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "id")?;
    UserService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::message("User deleted successfully!"))
}

/// GET /users/restore?id=
pub async fn restore(
    State(state): State<AppState>,
    query: Result<Query<RestoreQuery>, QueryRejection>,
) -> ApiResult<User> {
    let Query(query) = query?;
    let id = query.require_id()?;
    let user = UserService::new(&state.db).restore(id).await?;
    Ok(ApiResponse::success(user).with_message("User restored successfully!"))
}
