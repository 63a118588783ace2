// handlers/contacts.rs - /contacts

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::api::parse_id;
use crate::database::models::{Contact, ContactWithOwner, NewContact};
use crate::error::ApiError;
use crate::services::ContactService;
use crate::state::AppState;

/// POST /contacts/:user_id - payload merged with the owning user id from the path
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let user_id = parse_id(&user_id, "user_id")?;
    let Json(payload) = body?;
    let contact: NewContact = ApiError::parse_payload(payload)?;
    let created = ContactService::new(&state.db).create(user_id, contact).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /contacts
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactWithOwner>>, ApiError> {
    Ok(Json(ContactService::new(&state.db).list().await?))
}
