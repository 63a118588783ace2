// handlers/subjects.rs - /subjects

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{parse_id, ApiResponse, ApiResult};
use crate::database::models::{NewSubject, Subject, SubjectWithUsers};
use crate::error::ApiError;
use crate::services::SubjectService;
use crate::state::AppState;

/// POST /subjects
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let Json(payload) = body?;
    let subject: NewSubject = ApiError::parse_payload(payload)?;
    let created = SubjectService::new(&state.db).create(subject).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignParams {
    pub user_id: Option<String>,
    pub subject_id: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /subjects/assign/:user_id/:subject_id
///
/// Also mounted on the shorter paths so that a missing identifier is a 400
/// rather than an unmatched route.
pub async fn assign(
    State(state): State<AppState>,
    params: Option<Path<AssignParams>>,
) -> ApiResult<()> {
    let params = params.map(|Path(p)| p).unwrap_or_default();
    let (Some(user_id), Some(subject_id)) = (present(params.user_id), present(params.subject_id)) else {
        return Err(ApiError::bad_request("Missing user_id or subject_id"));
    };
    let user_id = parse_id(&user_id, "user_id")?;
    let subject_id = parse_id(&subject_id, "subject_id")?;

    let created = SubjectService::new(&state.db).assign(user_id, subject_id).await?;
    if created {
        Ok(ApiResponse::created_message("Subject assigned successfully"))
    } else {
        Ok(ApiResponse::message("Subject already assigned"))
    }
}

/// GET /subjects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SubjectWithUsers>>, ApiError> {
    Ok(Json(SubjectService::new(&state.db).list().await?))
}

/// GET /subjects/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubjectWithUsers>, ApiError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(SubjectService::new(&state.db).find(id).await?))
}

/// DELETE /subjects/:id - hard delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "id")?;
    SubjectService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::message("Subject deleted successfully"))
}
